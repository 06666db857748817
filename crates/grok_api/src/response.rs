use serde::Deserialize;
use serde_json::Value;

use crate::error::GrokApiError;

/// Concatenate every `output_text` part of every `message` output item.
///
/// Items and parts are visited in list order; anything with an unexpected
/// shape is skipped rather than treated as an error.
pub fn extract_output_text(body: &Value) -> String {
    let Some(items) = body.get("output").and_then(Value::as_array) else {
        return String::new();
    };

    let mut text = String::new();
    for item in items {
        if item.get("type").and_then(Value::as_str) != Some("message") {
            continue;
        }
        let Some(parts) = item.get("content").and_then(Value::as_array) else {
            continue;
        };
        for part in parts {
            if part.get("type").and_then(Value::as_str) == Some("output_text") {
                if let Some(fragment) = part.get("text").and_then(Value::as_str) {
                    text.push_str(fragment);
                }
            }
        }
    }
    text
}

/// Assistant text for a successful response, never empty.
///
/// Falls back to the serialized response when no output text was found.
pub fn response_text(body: &Value) -> String {
    let text = extract_output_text(body);
    if !text.is_empty() {
        return text;
    }
    body.to_string()
}

#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
}

/// Parse the file id out of an upload response body.
pub fn parse_file_id(body: &str) -> Result<String, GrokApiError> {
    let parsed: FileObject =
        serde_json::from_str(body).map_err(|source| match serde_json::from_str::<Value>(body) {
            Ok(_) => GrokApiError::MissingFileId {
                body: body.to_string(),
            },
            Err(_) => GrokApiError::InvalidJson {
                body: body.to_string(),
                source,
            },
        })?;

    if parsed.id.trim().is_empty() {
        return Err(GrokApiError::MissingFileId {
            body: body.to_string(),
        });
    }
    Ok(parsed.id)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn concatenates_output_text_parts_in_order() {
        let body = json!({
            "output": [
                {"type": "web_search_call", "status": "completed"},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "hi"},
                    {"type": "refusal", "text": "ignored"},
                    {"type": "output_text", "text": " there"}
                ]},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "!"}
                ]}
            ]
        });

        assert_eq!(extract_output_text(&body), "hi there!");
    }

    #[test]
    fn unexpected_shapes_fall_back_to_serialized_body() {
        let body = json!({"output": [{"type": "message", "content": "not a list"}], "id": "r1"});

        assert_eq!(extract_output_text(&body), "");
        assert_eq!(response_text(&body), body.to_string());
    }

    #[test]
    fn file_id_parsing_distinguishes_missing_id_from_bad_json() {
        assert_eq!(
            parse_file_id(r#"{"id":"file-abc","bytes":5}"#).expect("id should parse"),
            "file-abc"
        );
        assert!(matches!(
            parse_file_id(r#"{"object":"file"}"#),
            Err(GrokApiError::MissingFileId { .. })
        ));
        assert!(matches!(
            parse_file_id(r#"{"id":""}"#),
            Err(GrokApiError::MissingFileId { .. })
        ));
        assert!(matches!(
            parse_file_id("<html>"),
            Err(GrokApiError::InvalidJson { .. })
        ));
    }
}
