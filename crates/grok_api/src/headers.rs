use std::collections::BTreeMap;

use crate::config::{GrokApiConfig, DEFAULT_USER_AGENT};
use crate::error::GrokApiError;

pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_USER_AGENT: &str = "user-agent";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Build a deterministic header map for one Grok request.
///
/// Every request carries bearer auth and the tool's `User-Agent`; the body
/// content type differs between JSON and multipart requests.
pub fn build_headers(
    config: &GrokApiConfig,
    content_type: &str,
) -> Result<BTreeMap<String, String>, GrokApiError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(GrokApiError::MissingApiKey);
    }

    let mut headers = BTreeMap::new();
    headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("Bearer {api_key}"));
    headers.insert(HEADER_CONTENT_TYPE.to_owned(), content_type.to_owned());
    headers.insert(HEADER_ACCEPT.to_owned(), CONTENT_TYPE_JSON.to_owned());

    let user_agent = match config.user_agent.trim() {
        "" => DEFAULT_USER_AGENT,
        explicit => explicit,
    };
    headers.insert(HEADER_USER_AGENT.to_owned(), user_agent.to_owned());

    Ok(headers)
}
