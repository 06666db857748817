use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend payload kept alongside a result for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPayload {
    Text(String),
    Json(Value),
}

impl RawPayload {
    #[must_use]
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Json(Value::Null) => true,
            Self::Json(_) => false,
        }
    }
}

impl Default for RawPayload {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Uniform outcome of one `ask` call.
///
/// Exactly one of `response` and `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub response: Option<String>,
    pub session_id: Option<String>,
    pub error: Option<String>,
    pub raw: RawPayload,
}

impl AgentResult {
    #[must_use]
    pub fn success(
        response: impl Into<String>,
        session_id: Option<String>,
        raw: impl Into<RawPayload>,
    ) -> Self {
        Self {
            response: Some(response.into()),
            session_id,
            error: None,
            raw: raw.into(),
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>, raw: impl Into<RawPayload>) -> Self {
        Self {
            response: None,
            session_id: None,
            error: Some(error.into()),
            raw: raw.into(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{AgentResult, RawPayload};

    #[test]
    fn failure_clears_response_and_session() {
        let result = AgentResult::failure("boom", "");

        assert_eq!(result.response, None);
        assert_eq!(result.session_id, None);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.raw.is_empty());
    }

    #[test]
    fn raw_payload_serializes_untagged() {
        let text = AgentResult::success("ok", Some("s-1".to_string()), "plain");
        let structured = AgentResult::success("ok", None, json!({"output": []}));

        let text = serde_json::to_value(&text).expect("text result should serialize");
        let structured =
            serde_json::to_value(&structured).expect("structured result should serialize");

        assert_eq!(text["raw"], "plain");
        assert_eq!(text["session_id"], "s-1");
        assert_eq!(structured["raw"], json!({"output": []}));
        assert!(structured["error"].is_null());
    }

    #[test]
    fn json_raw_is_empty_only_when_null() {
        assert!(RawPayload::Json(serde_json::Value::Null).is_empty());
        assert!(!RawPayload::Json(json!({})).is_empty());
    }
}
