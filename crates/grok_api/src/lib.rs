//! Transport-only client primitives for the xAI Grok API.
//!
//! This crate owns request building, the hand-built multipart upload body and
//! response parsing for two endpoints: `POST {base}/files` and
//! `POST {base}/responses`. It contains no key discovery, no retries and no
//! conversation state; callers decide what to send and how to report failures.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod multipart;
pub mod payload;
pub mod response;
pub mod url;

pub use client::GrokApiClient;
pub use config::GrokApiConfig;
pub use error::GrokApiError;
pub use multipart::MultipartBody;
pub use payload::{GrokRequest, GrokTool};
pub use response::{extract_output_text, response_text};
pub use url::{normalize_base_url, DEFAULT_GROK_BASE_URL};
pub use reqwest::StatusCode;
