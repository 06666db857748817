use std::path::PathBuf;

use agent_adapter::{AgentKind, Role};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::SessionStoreError;

pub const SESSION_VERSION: u32 = 1;

const SESSION_ID_LEN: usize = 8;

/// One persisted turn half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionMessage {
    pub role: Role,
    pub content: String,
    /// Attachments sent with this message, as resolved absolute paths.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    pub ts: String,
}

/// A stored conversation with one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionRecord {
    pub version: u32,
    pub id: String,
    pub agent: AgentKind,
    #[serde(default)]
    pub name: Option<String>,
    /// Continuation token issued by the backend, when it has one.
    #[serde(default)]
    pub backend_session_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}

impl SessionRecord {
    #[must_use]
    pub fn with_id(
        id: impl Into<String>,
        agent: AgentKind,
        name: Option<String>,
        created_at: impl Into<String>,
    ) -> Self {
        let created_at = created_at.into();
        Self {
            version: SESSION_VERSION,
            id: id.into(),
            agent,
            name: name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            backend_session_id: None,
            model: None,
            updated_at: created_at.clone(),
            created_at,
            messages: Vec::new(),
        }
    }

    /// Appends one user/assistant exchange and bumps `updated_at`.
    ///
    /// A `None` token or model keeps the previous value.
    pub fn push_turn(
        &mut self,
        user: &str,
        files: &[PathBuf],
        assistant: &str,
        backend_session_id: Option<String>,
        model: Option<String>,
    ) -> Result<(), SessionStoreError> {
        let ts = now_rfc3339()?;
        self.messages.push(SessionMessage {
            role: Role::User,
            content: user.to_string(),
            files: files.to_vec(),
            ts: ts.clone(),
        });
        self.messages.push(SessionMessage {
            role: Role::Assistant,
            content: assistant.to_string(),
            files: Vec::new(),
            ts: ts.clone(),
        });
        if backend_session_id.is_some() {
            self.backend_session_id = backend_session_id;
        }
        if model.is_some() {
            self.model = model;
        }
        self.updated_at = ts;
        Ok(())
    }

    /// Name if set, otherwise the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Number of completed exchanges.
    #[must_use]
    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role == Role::User)
            .count()
    }

    pub(crate) fn updated_at_time(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.updated_at, &Rfc3339).ok()
    }
}

pub fn now_rfc3339() -> Result<String, SessionStoreError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(SessionStoreError::ClockFormat)
}

/// Random short id: the first hex digits of a v4 uuid.
pub(crate) fn new_session_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(SESSION_ID_LEN);
    id
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn session_ids_are_short_hex() {
        let id = new_session_id();

        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn blank_name_is_dropped() {
        let record = SessionRecord::with_id(
            "abcd1234",
            AgentKind::Claude,
            Some("  ".to_string()),
            "2026-01-01T00:00:00Z",
        );

        assert_eq!(record.name, None);
        assert_eq!(record.display_name(), "abcd1234");
    }

    #[test]
    fn push_turn_keeps_previous_token_when_none_is_given() {
        let mut record =
            SessionRecord::with_id("abcd1234", AgentKind::Claude, None, "2026-01-01T00:00:00Z");

        record
            .push_turn("hi", &[], "hello", Some("sess-1".to_string()), Some("opus".to_string()))
            .expect("first turn");
        record
            .push_turn("again", &[PathBuf::from("/w/a.rs")], "sure", None, None)
            .expect("second turn");

        assert_eq!(record.backend_session_id.as_deref(), Some("sess-1"));
        assert_eq!(record.model.as_deref(), Some("opus"));
        assert_eq!(record.turn_count(), 2);
        assert_eq!(record.messages[2].files, vec![PathBuf::from("/w/a.rs")]);
        assert_ne!(record.updated_at, record.created_at);
    }

    #[test]
    fn record_serializes_with_lowercase_agent_and_roles() {
        let mut record = SessionRecord::with_id(
            "abcd1234",
            AgentKind::Grok,
            Some("review".to_string()),
            "2026-01-01T00:00:00Z",
        );
        record.messages.push(SessionMessage {
            role: Role::User,
            content: "hi".to_string(),
            files: Vec::new(),
            ts: "2026-01-01T00:00:01Z".to_string(),
        });

        let value = serde_json::to_value(&record).expect("serialize");

        assert_eq!(
            value,
            json!({
                "version": 1,
                "id": "abcd1234",
                "agent": "grok",
                "name": "review",
                "backend_session_id": null,
                "model": null,
                "created_at": "2026-01-01T00:00:00Z",
                "updated_at": "2026-01-01T00:00:00Z",
                "messages": [
                    {"role": "user", "content": "hi", "files": [], "ts": "2026-01-01T00:00:01Z"}
                ]
            })
        );
    }
}
