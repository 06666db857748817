use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Per-agent option map handed to an adapter.
///
/// Owned by the configuration layer. Adapters only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterConfig(Map<String, Value>);

impl AdapterConfig {
    /// Builds a config from any JSON value; non-objects yield an empty config.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(values) => Self(values),
            _ => Self::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Trimmed string value; blank strings count as absent.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// String list value. A single string is a one-element list; non-string
    /// array items are skipped.
    #[must_use]
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            Some(Value::String(value)) if !value.trim().is_empty() => vec![value.clone()],
            _ => Vec::new(),
        }
    }

    /// Strictly positive integer value.
    #[must_use]
    pub fn positive_u64(&self, key: &str) -> Option<u64> {
        self.0
            .get(key)
            .and_then(Value::as_u64)
            .filter(|value| *value > 0)
    }
}
