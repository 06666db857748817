//! Grok implementation of the shared `agent_adapter` contract.
//!
//! One `ask` call walks a fixed sequence: resolve the API key, upload each
//! attachment, build the payload, send it, then parse the reply. The first
//! failure ends the call with an error result. Nothing is retried, and a
//! failed upload means the main request is never sent.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use agent_adapter::{
    AdapterConfig, AdapterError, AgentAdapter, AgentKind, AgentResult, AskRequest, ContentPart,
    HistoryContent, HistoryEntry,
};
use grok_api::payload::{user_item_with_files, user_text_item};
use grok_api::{response_text, GrokApiClient, GrokApiConfig, GrokApiError, GrokRequest};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Environment variable consulted when config has no `api_key`.
pub const GROK_API_KEY_ENV: &str = "GROK_API_KEY";

/// Model used when neither the request nor config names one.
pub const DEFAULT_GROK_MODEL: &str = "grok-4-latest";

pub const MISSING_API_KEY_MESSAGE: &str =
    "Grok API key not found. Set api_key in config or GROK_API_KEY env var";

/// Blocking seam over the two Grok endpoints.
pub trait GrokTransport: Send + Sync {
    /// Uploads one file and returns its file id.
    fn upload_file(&self, config: &GrokApiConfig, path: &Path) -> Result<String, GrokApiError>;

    /// Sends one responses request and returns the decoded body.
    fn create_response(
        &self,
        config: &GrokApiConfig,
        request: &GrokRequest,
    ) -> Result<Value, GrokApiError>;
}

/// Real HTTP transport: drives `grok_api` on a per-call current-thread runtime.
#[derive(Debug, Default)]
pub struct HttpTransport;

impl HttpTransport {
    fn block_on<F: Future>(future: F) -> Result<F::Output, GrokApiError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| GrokApiError::Runtime(error.to_string()))?;

        Ok(runtime.block_on(future))
    }
}

impl GrokTransport for HttpTransport {
    fn upload_file(&self, config: &GrokApiConfig, path: &Path) -> Result<String, GrokApiError> {
        let client = GrokApiClient::new(config.clone())?;
        Self::block_on(client.upload_file(path))?
    }

    fn create_response(
        &self,
        config: &GrokApiConfig,
        request: &GrokRequest,
    ) -> Result<Value, GrokApiError> {
        let client = GrokApiClient::new(config.clone())?;
        Self::block_on(client.create_response(request))?
    }
}

/// HTTP adapter for xAI's Grok.
pub struct GrokAdapter {
    config: AdapterConfig,
    env_api_key: Option<String>,
    transport: Arc<dyn GrokTransport>,
}

impl GrokAdapter {
    /// Creates an adapter over real HTTP, reading the key fallback from the
    /// environment.
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        Self::with_transport(config, api_key_from_env(), Arc::new(HttpTransport))
    }

    /// Creates an adapter with an explicit key fallback and transport.
    #[must_use]
    pub fn with_transport(
        config: AdapterConfig,
        env_api_key: Option<String>,
        transport: Arc<dyn GrokTransport>,
    ) -> Self {
        Self {
            config,
            env_api_key,
            transport,
        }
    }

    /// Config `api_key` first, then the environment fallback.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.config
            .string("api_key")
            .map(str::to_string)
            .or_else(|| {
                self.env_api_key
                    .as_deref()
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .map(str::to_string)
            })
    }

    fn api_config(&self, api_key: String) -> GrokApiConfig {
        let mut api = GrokApiConfig::new(api_key);
        if let Some(base_url) = self.config.string("base_url") {
            api = api.with_base_url(base_url);
        }
        if let Some(timeout_sec) = self.config.positive_u64("timeout_sec") {
            api = api.with_timeout(Duration::from_secs(timeout_sec));
        }
        api
    }

    fn model_for(&self, request: &AskRequest) -> String {
        request
            .model_override()
            .or_else(|| self.config.string("model"))
            .unwrap_or(DEFAULT_GROK_MODEL)
            .to_string()
    }

    fn upload_files(
        &self,
        api: &GrokApiConfig,
        files: &[PathBuf],
    ) -> Result<Vec<String>, AdapterError> {
        let mut file_ids = Vec::with_capacity(files.len());
        for path in files {
            info!("Uploading {}...", display_name(path));
            let file_id = self
                .transport
                .upload_file(api, path)
                .map_err(|error| AdapterError::Upload {
                    file: path.clone(),
                    reason: error.to_string(),
                })?;
            debug!(file = %path.display(), %file_id, "file uploaded");
            file_ids.push(file_id);
        }
        Ok(file_ids)
    }

    fn try_ask(&self, request: AskRequest) -> Result<AgentResult, AdapterError> {
        let api_key = self
            .resolve_api_key()
            .ok_or_else(|| AdapterError::Configuration(MISSING_API_KEY_MESSAGE.to_string()))?;
        let api = self.api_config(api_key);
        let model = self.model_for(&request);

        let file_ids = self.upload_files(&api, &request.files)?;
        let payload = GrokRequest::new(
            model,
            build_input(&request.history, &request.message, &file_ids),
        );

        let body = self
            .transport
            .create_response(&api, &payload)
            .map_err(classify_error)?;

        Ok(AgentResult::success(response_text(&body), None, body))
    }
}

impl AgentAdapter for GrokAdapter {
    fn kind(&self) -> AgentKind {
        AgentKind::Grok
    }

    fn supports_attachments(&self) -> bool {
        true
    }

    fn ask(&self, request: AskRequest) -> AgentResult {
        match self.try_ask(request) {
            Ok(result) => result,
            Err(error) => {
                warn!(%error, "grok request failed");
                error.into()
            }
        }
    }
}

/// Reads [`GROK_API_KEY_ENV`], treating blank values as unset.
#[must_use]
pub fn api_key_from_env() -> Option<String> {
    std::env::var(GROK_API_KEY_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Request `input`: history in order, then the new user turn.
#[must_use]
pub fn build_input(history: &[HistoryEntry], message: &str, file_ids: &[String]) -> Vec<Value> {
    let mut input: Vec<Value> = history.iter().map(history_item).collect();
    if file_ids.is_empty() {
        input.push(user_text_item(message));
    } else {
        input.push(user_item_with_files(message, file_ids));
    }
    input
}

fn history_item(entry: &HistoryEntry) -> Value {
    let content = match &entry.content {
        HistoryContent::Text(text) => Value::String(text.clone()),
        HistoryContent::Parts(parts) => parts
            .iter()
            .map(|part| match part {
                ContentPart::InputText { text } => json!({"type": "input_text", "text": text}),
                ContentPart::InputFile { file_id } => {
                    json!({"type": "input_file", "file_id": file_id})
                }
            })
            .collect(),
    };
    json!({"role": entry.role.as_str(), "content": content})
}

fn classify_error(error: GrokApiError) -> AdapterError {
    let agent = AgentKind::Grok.label().to_string();
    match error {
        GrokApiError::Status { status, body } => AdapterError::Protocol {
            agent,
            status: status.as_u16(),
            body,
        },
        GrokApiError::InvalidJson { body, source } => AdapterError::InvalidResponse {
            agent,
            reason: source.to_string(),
            body,
        },
        GrokApiError::MissingApiKey | GrokApiError::InvalidHeader { .. } => {
            AdapterError::Configuration(error.to_string())
        }
        GrokApiError::Transport { .. }
        | GrokApiError::Runtime(_)
        | GrokApiError::ReadFile { .. }
        | GrokApiError::MissingFileId { .. } => AdapterError::Transport(error.to_string()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
