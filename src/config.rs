//! `config.json` loading, merged over built-in defaults.

use std::path::Path;

use agent_adapter::{AdapterConfig, AgentKind, UnknownAgentError};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Effective configuration: the user file deep-merged over [`Config::defaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    value: Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            value: Self::defaults(),
        }
    }
}

impl Config {
    /// Built-in configuration. Auto-approval flags are on so agents can act
    /// without prompting.
    #[must_use]
    pub fn defaults() -> Value {
        json!({
            "adapters": {
                "claude": {"command": "claude", "args": ["--dangerously-skip-permissions"]},
                "codex": {"command": "codex", "args": ["--full-auto"]},
                "gemini": {"command": "gemini", "args": ["-y"]},
                "grok": {"model": "grok-4-latest"}
            },
            "defaults": {"agent": "claude"}
        })
    }

    /// Merges `overrides` over the defaults.
    #[must_use]
    pub fn from_value(overrides: Value) -> Self {
        let mut value = Self::defaults();
        deep_merge(&mut value, overrides);
        Self { value }
    }

    /// Reads `path`. A missing file yields the defaults; an unreadable or
    /// invalid one does too, with a warning.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Self::default();
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "could not read config, using defaults");
                return Self::default();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(overrides @ Value::Object(_)) => Self::from_value(overrides),
            Ok(_) => {
                warn!(path = %path.display(), "config is not a JSON object, using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(path = %path.display(), %error, "invalid config JSON, using defaults");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// The merged option map for one agent; empty when absent.
    #[must_use]
    pub fn adapter_config(&self, agent: AgentKind) -> AdapterConfig {
        self.value
            .get("adapters")
            .and_then(|adapters| adapters.get(agent.name()))
            .cloned()
            .map(AdapterConfig::from_value)
            .unwrap_or_default()
    }

    /// `defaults.agent`, falling back to claude when unset.
    pub fn default_agent(&self) -> Result<AgentKind, UnknownAgentError> {
        match self
            .value
            .get("defaults")
            .and_then(|defaults| defaults.get("agent"))
            .and_then(Value::as_str)
        {
            Some(name) => name.parse(),
            None => Ok(AgentKind::Claude),
        }
    }

    /// Copy safe to print: every adapter `api_key` is shortened.
    #[must_use]
    pub fn masked(&self) -> Value {
        let mut value = self.value.clone();
        if let Some(adapters) = value.get_mut("adapters").and_then(Value::as_object_mut) {
            for adapter in adapters.values_mut() {
                if let Some(key) = adapter.get_mut("api_key") {
                    if let Some(text) = key.as_str().filter(|text| !text.is_empty()) {
                        *key = Value::String(mask_secret(text));
                    }
                }
            }
        }
        value
    }
}

/// First 8 characters plus `...`, or `***` for short secrets.
#[must_use]
pub fn mask_secret(secret: &str) -> String {
    if secret.chars().count() > 8 {
        let prefix: String = secret.chars().take(8).collect();
        format!("{prefix}...")
    } else {
        "***".to_string()
    }
}

/// Objects merge per key recursively; any other override value replaces.
pub fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                let nested = value.is_object() && base.get(&key).is_some_and(Value::is_object);
                if !nested {
                    base.insert(key, value);
                } else if let Some(existing) = base.get_mut(&key) {
                    deep_merge(existing, value);
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
