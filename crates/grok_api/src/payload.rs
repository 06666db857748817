use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Server-side tools enabled on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GrokTool {
    WebSearch,
    XSearch,
}

/// The fixed tool set: web search and X search, always both.
pub fn default_tools() -> Vec<GrokTool> {
    vec![GrokTool::WebSearch, GrokTool::XSearch]
}

/// Request payload for the responses endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrokRequest {
    pub model: String,
    /// Conversation items in send order: replayed history then the new turn.
    pub input: Vec<Value>,
    pub tools: Vec<GrokTool>,
}

impl GrokRequest {
    pub fn new(model: impl Into<String>, input: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            input,
            tools: default_tools(),
        }
    }
}

/// Plain-text user item.
pub fn user_text_item(text: &str) -> Value {
    json!({"role": "user", "content": text})
}

/// User item with one `input_text` part followed by one `input_file` part per
/// uploaded file id, in the given order.
pub fn user_item_with_files(text: &str, file_ids: &[String]) -> Value {
    let mut content = Vec::with_capacity(file_ids.len() + 1);
    content.push(json!({"type": "input_text", "text": text}));
    content.extend(
        file_ids
            .iter()
            .map(|file_id| json!({"type": "input_file", "file_id": file_id})),
    );
    json!({"role": "user", "content": content})
}
