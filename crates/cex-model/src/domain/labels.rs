use serde::{Deserialize, Serialize};

use crate::Label;

/// Ordered task label set.
///
/// Unlike a map, the scheduler may deliver the same key more than once;
/// lookups return the first match and iteration preserves delivery order.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub Vec<Label>);

impl Labels {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a label, keeping any earlier label with the same key.
    pub fn push<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(Label::new(key, value));
        self
    }

    /// Value of the first label with the given key.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|l| l.key() == key).map(Label::value)
    }

    /// Iterate in delivery order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.0.iter()
    }
}

impl<L: Into<Label>> FromIterator<L> for Labels {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::Labels;

    #[test]
    fn first_match_wins_for_repeated_keys() {
        let labels: Labels = [("k", "one"), ("x", "y"), ("k", "two")].into_iter().collect();
        assert_eq!(labels.first("k"), Some("one"));
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn absent_key_is_none() {
        let labels = Labels::new();
        assert!(labels.first("processor").is_none());
        assert!(labels.is_empty());
    }

    #[test]
    fn serializes_as_plain_array() {
        let mut labels = Labels::new();
        labels.push("a", "1").push("b", "2");

        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[{"key":"a","value":"1"},{"key":"b","value":"2"}]"#);

        let back: Labels = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
    }
}
