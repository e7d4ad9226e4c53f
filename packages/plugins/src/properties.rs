use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String key/value settings attached to one plugin declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginProperties(BTreeMap<String, String>);

impl PluginProperties {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    /// Value with surrounding whitespace removed, `None` when blank
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Case-insensitive `"true"`; anything else, including absence, is false
    pub fn is_true(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

impl From<BTreeMap<String, String>> for PluginProperties {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
