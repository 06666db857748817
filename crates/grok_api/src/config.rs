use std::time::Duration;

use crate::url::DEFAULT_GROK_BASE_URL;

/// `User-Agent` sent when the caller does not override it.
pub const DEFAULT_USER_AGENT: &str = "hire-ai";

/// Transport configuration for Grok API requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrokApiConfig {
    /// Bearer token passed in `Authorization`.
    pub api_key: String,
    /// API root, e.g. `https://api.x.ai/v1`.
    pub base_url: String,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Optional whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GrokApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GROK_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl GrokApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
