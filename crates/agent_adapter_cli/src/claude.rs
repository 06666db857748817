use std::sync::Arc;

use agent_adapter::{AdapterConfig, AdapterError, AgentAdapter, AgentKind, AgentResult, AskRequest};
use serde_json::Value;
use tracing::warn;

use crate::options::{message_with_files, CliOptions};
use crate::process::{run_backend, CliInvocation, ProcessRunner, SystemProcessRunner};

/// Adapter for Anthropic's `claude` CLI in print mode.
pub struct ClaudeAdapter {
    options: CliOptions,
    runner: Arc<dyn ProcessRunner>,
}

impl ClaudeAdapter {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemProcessRunner))
    }

    #[must_use]
    pub fn with_runner(config: &AdapterConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            options: CliOptions::from_config(AgentKind::Claude, config),
            runner,
        }
    }

    #[must_use]
    pub fn invocation(&self, request: &AskRequest) -> CliInvocation {
        let mut args = self.options.args.clone();
        args.extend(["-p", "--output-format", "json"].map(String::from));
        if let Some(model) = request.model_override() {
            args.extend(["--model".to_string(), model.to_string()]);
        }
        if let Some(session) = request.session_token() {
            args.extend(["--resume".to_string(), session.to_string()]);
        }

        CliInvocation {
            program: self.options.command.clone(),
            args,
            stdin: message_with_files(&request.message, &request.files),
        }
    }

    fn try_ask(&self, request: &AskRequest) -> Result<AgentResult, AdapterError> {
        let invocation = self.invocation(request);
        let output = run_backend(self.runner.as_ref(), AgentKind::Claude, &invocation)?;
        Ok(parse_output(&output.stdout))
    }
}

impl AgentAdapter for ClaudeAdapter {
    fn kind(&self) -> AgentKind {
        AgentKind::Claude
    }

    fn ask(&self, request: AskRequest) -> AgentResult {
        self.try_ask(&request).unwrap_or_else(|error| {
            warn!(%error, "claude call failed");
            error.into()
        })
    }
}

const NO_RESPONSE: &str = "Claude returned no response";

/// Parses `--output-format json` stdout. Anything that is not a JSON object is
/// taken verbatim as the response. Empty text is a failure.
#[must_use]
pub fn parse_output(stdout: &str) -> AgentResult {
    let trimmed = stdout.trim();
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed) else {
        if trimmed.is_empty() {
            return AgentResult::failure(NO_RESPONSE, stdout);
        }
        return AgentResult::success(trimmed, None, stdout);
    };

    let text = object
        .get("result")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let session_id = object
        .get("session_id")
        .and_then(Value::as_str)
        .map(str::to_string);
    let is_error = object
        .get("is_error")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let raw = Value::Object(object);

    if is_error {
        let message = if text.is_empty() {
            "Claude reported an error".to_string()
        } else {
            text
        };
        return AgentResult::failure(message, raw);
    }
    if text.trim().is_empty() {
        return AgentResult::failure(NO_RESPONSE, raw);
    }
    AgentResult::success(text, session_id, raw)
}
