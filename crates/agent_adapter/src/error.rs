use std::path::PathBuf;

use thiserror::Error;

use crate::result::{AgentResult, RawPayload};

/// Failure taxonomy shared by all adapters.
///
/// Adapters build these internally and convert them into an [`AgentResult`]
/// at the `ask` boundary; the `Display` text becomes `AgentResult::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// Missing credentials or unusable settings. Raised before any I/O.
    #[error("{0}")]
    Configuration(String),

    /// One attachment could not be uploaded; the whole call is aborted.
    #[error("File upload failed for {}: {reason}", file.display())]
    Upload { file: PathBuf, reason: String },

    /// Connect, DNS or timeout failure.
    #[error("Connection error: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("{agent} API error: {status} {body}")]
    Protocol {
        agent: String,
        status: u16,
        body: String,
    },

    /// The backend answered 2xx with a body that could not be decoded.
    #[error("{agent} API error: invalid JSON response: {reason}")]
    InvalidResponse {
        agent: String,
        reason: String,
        body: String,
    },

    /// A backend process exited unsuccessfully.
    #[error("{}", backend_failure_message(agent, *code, stderr, stdout))]
    BackendExecution {
        agent: String,
        code: Option<i32>,
        stderr: String,
        stdout: String,
    },

    /// A backend process could not be started.
    #[error("{0}")]
    Launch(String),
}

impl AdapterError {
    /// Payload kept in `AgentResult::raw` for this failure.
    #[must_use]
    pub fn raw_payload(&self) -> RawPayload {
        match self {
            Self::Protocol { body, .. } | Self::InvalidResponse { body, .. } => {
                RawPayload::Text(body.clone())
            }
            Self::BackendExecution { stdout, .. } => RawPayload::Text(stdout.clone()),
            Self::Configuration(_) | Self::Upload { .. } | Self::Transport(_) | Self::Launch(_) => {
                RawPayload::empty()
            }
        }
    }
}

impl From<AdapterError> for AgentResult {
    fn from(error: AdapterError) -> Self {
        let raw = error.raw_payload();
        AgentResult::failure(error.to_string(), raw)
    }
}

fn backend_failure_message(agent: &str, code: Option<i32>, stderr: &str, stdout: &str) -> String {
    let status = match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    };
    let detail = [stderr.trim(), stdout.trim()]
        .into_iter()
        .find(|text| !text.is_empty())
        .unwrap_or("no output");
    format!("{agent} failed with {status}: {detail}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::result::{AgentResult, RawPayload};

    use super::AdapterError;

    #[test]
    fn protocol_and_transport_errors_stay_distinguishable() {
        let protocol: AgentResult = AdapterError::Protocol {
            agent: "Grok".to_string(),
            status: 503,
            body: "{\"error\":\"busy\"}".to_string(),
        }
        .into();
        let transport: AgentResult = AdapterError::Transport("connection refused".to_string()).into();

        assert_eq!(
            protocol.error.as_deref(),
            Some("Grok API error: 503 {\"error\":\"busy\"}")
        );
        assert_eq!(protocol.raw, RawPayload::Text("{\"error\":\"busy\"}".to_string()));
        assert_eq!(
            transport.error.as_deref(),
            Some("Connection error: connection refused")
        );
        assert!(transport.raw.is_empty());
    }

    #[test]
    fn upload_error_names_the_file() {
        let error = AdapterError::Upload {
            file: PathBuf::from("/work/b.txt"),
            reason: "HTTP 500".to_string(),
        };

        assert_eq!(error.to_string(), "File upload failed for /work/b.txt: HTTP 500");
    }

    #[test]
    fn backend_execution_prefers_stderr_then_stdout() {
        let with_stderr = AdapterError::BackendExecution {
            agent: "codex".to_string(),
            code: Some(2),
            stderr: "bad flag\n".to_string(),
            stdout: "ignored".to_string(),
        };
        let stdout_only = AdapterError::BackendExecution {
            agent: "codex".to_string(),
            code: None,
            stderr: String::new(),
            stdout: "partial".to_string(),
        };

        assert_eq!(with_stderr.to_string(), "codex failed with exit code 2: bad flag");
        assert_eq!(stdout_only.to_string(), "codex failed with a signal: partial");
        assert_eq!(stdout_only.raw_payload(), RawPayload::Text("partial".to_string()));
    }
}
