use serde::{Deserialize, Serialize};

/// Container environment as raw `KEY=VALUE` entries.
///
/// Entries are appended, never merged: a later entry with the same key is kept
/// alongside the earlier one and the container runtime resolves the collision
/// (last wins). [`Env::get`] mirrors that resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Env(Vec<String>);

impl Env {
    /// Create an empty environment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append `key=value`.
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.0.push(format!("{}={}", key.as_ref(), value.as_ref()));
    }

    /// Append an entry exactly as given (not parsed, not validated).
    pub fn push_raw(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Value the runtime will see for `key`: the last entry `key=...` wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().rev().find_map(|entry| {
            entry
                .strip_prefix(key)
                .and_then(|rest| rest.strip_prefix('='))
        })
    }

    /// Consume into the plain list handed to the runtime.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> Extend<S> for Env {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
