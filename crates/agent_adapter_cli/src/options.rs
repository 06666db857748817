use std::path::PathBuf;

use agent_adapter::{AdapterConfig, AgentKind};

/// Executable and fixed arguments for one subprocess backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub command: String,
    /// Auto-approval flags placed before the call-specific ones.
    pub args: Vec<String>,
}

impl CliOptions {
    /// Reads `command` and `args` from config, defaulting the command to the
    /// agent's name.
    #[must_use]
    pub fn from_config(agent: AgentKind, config: &AdapterConfig) -> Self {
        Self {
            command: config
                .string("command")
                .unwrap_or(agent.name())
                .to_string(),
            args: config.string_list("args"),
        }
    }
}

/// Appends one `@<path>` line per attachment.
#[must_use]
pub fn message_with_files(message: &str, files: &[PathBuf]) -> String {
    if files.is_empty() {
        return message.to_string();
    }
    let mut text = message.to_string();
    text.push('\n');
    for file in files {
        text.push_str("\n@");
        text.push_str(&file.display().to_string());
    }
    text
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn command_defaults_to_agent_name_and_args_to_empty() {
        let options = CliOptions::from_config(AgentKind::Codex, &AdapterConfig::default());

        assert_eq!(
            options,
            CliOptions {
                command: "codex".to_string(),
                args: Vec::new(),
            }
        );
    }

    #[test]
    fn config_overrides_command_and_args() {
        let config = AdapterConfig::default()
            .with("command", "/opt/bin/claude")
            .with("args", json!(["--dangerously-skip-permissions", "--verbose"]));

        let options = CliOptions::from_config(AgentKind::Claude, &config);

        assert_eq!(options.command, "/opt/bin/claude");
        assert_eq!(
            options.args,
            vec!["--dangerously-skip-permissions", "--verbose"]
        );
    }

    #[test]
    fn attachments_become_at_lines() {
        let text = message_with_files(
            "review",
            &[PathBuf::from("/w/a.rs"), PathBuf::from("/w/b.rs")],
        );

        assert_eq!(text, "review\n\n@/w/a.rs\n@/w/b.rs");
        assert_eq!(message_with_files("plain", &[]), "plain");
    }
}
