use std::sync::Arc;

use agent_adapter::{AdapterConfig, AdapterError, AgentAdapter, AgentKind, AgentResult, AskRequest};
use serde_json::Value;
use tracing::warn;

use crate::options::{message_with_files, CliOptions};
use crate::process::{run_backend, CliInvocation, ProcessRunner, SystemProcessRunner};
use crate::transcript::render_transcript;

/// Adapter for Google's `gemini` CLI.
///
/// The CLI has no resumable sessions, so every call replays the full history
/// as a transcript on stdin and `session_id` is always `None`.
pub struct GeminiAdapter {
    options: CliOptions,
    runner: Arc<dyn ProcessRunner>,
}

impl GeminiAdapter {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemProcessRunner))
    }

    #[must_use]
    pub fn with_runner(config: &AdapterConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            options: CliOptions::from_config(AgentKind::Gemini, config),
            runner,
        }
    }

    #[must_use]
    pub fn invocation(&self, request: &AskRequest) -> CliInvocation {
        let mut args = self.options.args.clone();
        args.extend(["--output-format".to_string(), "json".to_string()]);
        if let Some(model) = request.model_override() {
            args.extend(["--model".to_string(), model.to_string()]);
        }

        let message = message_with_files(&request.message, &request.files);
        CliInvocation {
            program: self.options.command.clone(),
            args,
            stdin: render_transcript(&request.history, &message),
        }
    }

    fn try_ask(&self, request: &AskRequest) -> Result<AgentResult, AdapterError> {
        let invocation = self.invocation(request);
        let output = run_backend(self.runner.as_ref(), AgentKind::Gemini, &invocation)?;
        Ok(parse_output(&output.stdout))
    }
}

impl AgentAdapter for GeminiAdapter {
    fn kind(&self) -> AgentKind {
        AgentKind::Gemini
    }

    fn ask(&self, request: AskRequest) -> AgentResult {
        self.try_ask(&request).unwrap_or_else(|error| {
            warn!(%error, "gemini call failed");
            error.into()
        })
    }
}

const NO_RESPONSE: &str = "Gemini returned no response";

#[must_use]
pub fn parse_output(stdout: &str) -> AgentResult {
    let trimmed = stdout.trim();
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) else {
        if trimmed.is_empty() {
            return AgentResult::failure(NO_RESPONSE, stdout);
        }
        return AgentResult::success(trimmed, None, stdout);
    };

    if let Some(error) = object.get("error").filter(|error| !error.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return AgentResult::failure(format!("Gemini error: {message}"), Value::Object(object));
    }

    let text = object
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if text.trim().is_empty() {
        return AgentResult::failure(NO_RESPONSE, Value::Object(object));
    }
    AgentResult::success(text, None, Value::Object(object))
}
