use std::error::Error as _;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrokApiError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("invalid header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The request never produced an HTTP response (connect, DNS, TLS, timeout).
    #[error("{reason}")]
    Transport { reason: String, timed_out: bool },

    /// The server answered with a non-success status.
    #[error("HTTP {} {body}", status.as_u16())]
    Status { status: StatusCode, body: String },

    #[error("invalid JSON response: {source}")]
    InvalidJson {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("upload response has no file id: {body}")]
    MissingFileId { body: String },

    #[error("failed to start async runtime: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for GrokApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport {
            timed_out: error.is_timeout(),
            reason: transport_reason(&error),
        }
    }
}

/// Flatten a transport error and its causes into one line.
///
/// `reqwest` keeps the useful part ("Connection refused", "dns error") in the
/// source chain, so the top-level message alone is rarely actionable.
pub fn transport_reason(error: &reqwest::Error) -> String {
    let mut reason = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !reason.contains(&text) {
            reason.push_str(": ");
            reason.push_str(&text);
        }
        source = cause.source();
    }
    reason
}
