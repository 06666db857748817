use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Speaker of one history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// One part of a structured message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    InputText { text: String },
    InputFile { file_id: String },
}

/// Message body: plain text, or an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl HistoryContent {
    /// Text view of the body. File parts carry no text and are skipped.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::InputText { text } => Some(text.as_str()),
                    ContentPart::InputFile { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

impl From<String> for HistoryContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for HistoryContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// One prior turn replayed for context. Order is send order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: HistoryContent,
}

impl HistoryEntry {
    #[must_use]
    pub fn user(content: impl Into<HistoryContent>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn assistant(content: impl Into<HistoryContent>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Input for one `ask` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    /// Text for this turn.
    pub message: String,
    /// Backend continuation token from an earlier turn, if any.
    pub session_id: Option<String>,
    /// Overrides the adapter's default model.
    pub model: Option<String>,
    /// Prior turns, oldest first. Empty means a fresh conversation.
    pub history: Vec<HistoryEntry>,
    /// Absolute paths to attach, in attachment order.
    pub files: Vec<PathBuf>,
}

impl AskRequest {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
            model: None,
            history: Vec::new(),
            files: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: Option<String>) -> Self {
        self.session_id = session_id;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    #[must_use]
    pub fn with_history(mut self, history: Vec<HistoryEntry>) -> Self {
        self.history = history;
        self
    }

    #[must_use]
    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    /// Model override with blank values treated as absent.
    #[must_use]
    pub fn model_override(&self) -> Option<&str> {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
    }

    /// Session token with blank values treated as absent.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn history_entries_serialize_as_role_content_objects() {
        let entries = vec![
            HistoryEntry::user("hi"),
            HistoryEntry::assistant("hello"),
            HistoryEntry::user(HistoryContent::Parts(vec![
                ContentPart::InputText {
                    text: "see file".to_string(),
                },
                ContentPart::InputFile {
                    file_id: "file-1".to_string(),
                },
            ])),
        ];

        let value = serde_json::to_value(&entries).expect("history should serialize");

        assert_eq!(
            value,
            json!([
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
                {"role": "user", "content": [
                    {"type": "input_text", "text": "see file"},
                    {"type": "input_file", "file_id": "file-1"}
                ]}
            ])
        );
    }

    #[test]
    fn structured_content_text_view_skips_file_parts() {
        let content = HistoryContent::Parts(vec![
            ContentPart::InputFile {
                file_id: "file-1".to_string(),
            },
            ContentPart::InputText {
                text: "summarize".to_string(),
            },
        ]);

        assert_eq!(content.text(), "summarize");
    }

    #[test]
    fn blank_overrides_are_treated_as_absent() {
        let request = AskRequest::new("x")
            .with_model(Some("  ".to_string()))
            .with_session_id(Some(String::new()));

        assert_eq!(request.model_override(), None);
        assert_eq!(request.session_token(), None);
    }
}
