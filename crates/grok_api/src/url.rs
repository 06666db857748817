/// Default API root for xAI requests.
pub const DEFAULT_GROK_BASE_URL: &str = "https://api.x.ai/v1";

/// Normalize a configured base URL.
///
/// Blank input falls back to [`DEFAULT_GROK_BASE_URL`]; trailing slashes are
/// dropped so endpoint joins never produce `//`.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_GROK_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

/// File upload endpoint for a base URL.
pub fn files_url(base_url: &str) -> String {
    format!("{}/files", normalize_base_url(base_url))
}

/// Responses endpoint for a base URL.
pub fn responses_url(base_url: &str) -> String {
    format!("{}/responses", normalize_base_url(base_url))
}
