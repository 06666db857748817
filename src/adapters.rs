//! Name to adapter registry.

use agent_adapter::{AgentAdapter, AgentKind, UnknownAgentError};
use agent_adapter_cli::{ClaudeAdapter, CodexAdapter, GeminiAdapter};
use agent_adapter_grok::GrokAdapter;

use crate::config::Config;

/// Builds adapters for the command layer.
pub trait AdapterFactory {
    fn build(&self, agent: AgentKind, config: &Config) -> Box<dyn AgentAdapter>;
}

/// The real backends.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAdapters;

impl AdapterFactory for DefaultAdapters {
    fn build(&self, agent: AgentKind, config: &Config) -> Box<dyn AgentAdapter> {
        let adapter_config = config.adapter_config(agent);
        match agent {
            AgentKind::Claude => Box::new(ClaudeAdapter::new(&adapter_config)),
            AgentKind::Codex => Box::new(CodexAdapter::new(&adapter_config)),
            AgentKind::Gemini => Box::new(GeminiAdapter::new(&adapter_config)),
            AgentKind::Grok => Box::new(GrokAdapter::new(adapter_config)),
        }
    }
}

/// Looks up an adapter by name.
pub fn get_adapter(
    name: &str,
    config: &Config,
) -> Result<Box<dyn AgentAdapter>, UnknownAgentError> {
    let agent: AgentKind = name.parse()?;
    Ok(DefaultAdapters.build(agent, config))
}
