use std::sync::Arc;

use agent_adapter::{AdapterConfig, AdapterError, AgentAdapter, AgentKind, AgentResult, AskRequest};
use serde_json::Value;
use tracing::{debug, warn};

use crate::options::{message_with_files, CliOptions};
use crate::process::{run_backend, CliInvocation, ProcessRunner, SystemProcessRunner};

/// Adapter for OpenAI's `codex exec` in JSON-events mode.
pub struct CodexAdapter {
    options: CliOptions,
    runner: Arc<dyn ProcessRunner>,
}

impl CodexAdapter {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemProcessRunner))
    }

    #[must_use]
    pub fn with_runner(config: &AdapterConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            options: CliOptions::from_config(AgentKind::Codex, config),
            runner,
        }
    }

    /// `codex exec <args> --json [--model M] [resume S] -`; the trailing `-`
    /// makes codex read the prompt from stdin.
    #[must_use]
    pub fn invocation(&self, request: &AskRequest) -> CliInvocation {
        let mut args = vec!["exec".to_string()];
        args.extend(self.options.args.iter().cloned());
        args.push("--json".to_string());
        if let Some(model) = request.model_override() {
            args.extend(["--model".to_string(), model.to_string()]);
        }
        if let Some(session) = request.session_token() {
            args.extend(["resume".to_string(), session.to_string()]);
        }
        args.push("-".to_string());

        CliInvocation {
            program: self.options.command.clone(),
            args,
            stdin: message_with_files(&request.message, &request.files),
        }
    }

    fn try_ask(&self, request: &AskRequest) -> Result<AgentResult, AdapterError> {
        let invocation = self.invocation(request);
        let output = run_backend(self.runner.as_ref(), AgentKind::Codex, &invocation)?;
        Ok(parse_events(&output.stdout))
    }
}

impl AgentAdapter for CodexAdapter {
    fn kind(&self) -> AgentKind {
        AgentKind::Codex
    }

    fn ask(&self, request: AskRequest) -> AgentResult {
        self.try_ask(&request).unwrap_or_else(|error| {
            warn!(%error, "codex call failed");
            error.into()
        })
    }
}

#[derive(Debug, Default)]
struct EventSummary {
    thread_id: Option<String>,
    messages: Vec<String>,
    error: Option<String>,
}

impl EventSummary {
    fn apply(&mut self, event: &Value) {
        match event.get("type").and_then(Value::as_str) {
            Some("thread.started") => {
                if let Some(thread_id) = event.get("thread_id").and_then(Value::as_str) {
                    self.thread_id = Some(thread_id.to_string());
                }
            }
            Some("item.completed") => {
                let item = event.get("item");
                let is_message = item
                    .and_then(|item| item.get("type"))
                    .and_then(Value::as_str)
                    == Some("agent_message");
                if let Some(text) = item
                    .filter(|_| is_message)
                    .and_then(|item| item.get("text"))
                    .and_then(Value::as_str)
                {
                    self.messages.push(text.to_string());
                }
            }
            Some("error") => {
                self.error = event
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| Some(event.to_string()));
            }
            Some("turn.failed") => {
                self.error = event
                    .get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| Some(event.to_string()));
            }
            _ => {}
        }
    }
}

/// Folds `--json` event lines into a result. Lines that are not JSON are
/// skipped.
#[must_use]
pub fn parse_events(stdout: &str) -> AgentResult {
    let mut summary = EventSummary::default();
    for line in stdout.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match serde_json::from_str::<Value>(line) {
            Ok(event) => summary.apply(&event),
            Err(_) => debug!(line, "skipping non-JSON codex output"),
        }
    }

    if let Some(error) = summary.error {
        return AgentResult::failure(format!("Codex error: {error}"), stdout);
    }
    if summary.messages.is_empty() {
        return AgentResult::failure("Codex returned no agent message", stdout);
    }
    AgentResult::success(summary.messages.join("\n\n"), summary.thread_id, stdout)
}
