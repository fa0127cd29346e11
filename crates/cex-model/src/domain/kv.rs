use serde::{Deserialize, Serialize};

/// One task label as delivered by the scheduler.
///
/// Keys are not unique within a label set, see [`crate::Labels::first`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    key: String,
    #[serde(default)]
    value: String,
}

impl Label {
    /// Create a new label.
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render the label as a `KEY=VALUE` environment entry.
    pub fn to_env_entry(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

impl From<(String, String)> for Label {
    fn from((key, value): (String, String)) -> Self {
        Self { key, value }
    }
}

impl From<(&str, &str)> for Label {
    fn from((key, value): (&str, &str)) -> Self {
        Self::new(key, value)
    }
}
