//! Keys of the documents stored in the remote store (tasks, users...)

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::Utc;

static KEY_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// The key a document is stored under, e.g. the `-O9x...` in `tasks/toDo/-O9x...`
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    content: String,
}

impl Key {
    /// Generate a new key.
    ///
    /// Like the keys generated by the remote store, these keys sort in creation order
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let seq = KEY_SEQUENCE.fetch_add(1, Ordering::Relaxed) & 0xffff;
        let random = uuid::Uuid::new_v4().to_simple().to_string();
        Self { content: format!("-{:012x}{:04x}{}", millis, seq, &random[..4]) }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self { content: s.to_string() }
    }
}
impl From<String> for Key {
    fn from(content: String) -> Self {
        Self { content }
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Key, D::Error>
    where
        D: Deserializer<'de>,
    {
        let content = String::deserialize(deserializer)?;
        Ok(Key{ content })
    }
}

/// Split a subtree of the store into its children, e.g. the tasks of a column.
///
/// The store may return sparse collections as arrays: their indices are used as keys, and holes are skipped
pub fn keyed_children(value: serde_json::Value) -> Vec<(Key, serde_json::Value)> {
    use serde_json::Value;

    match value {
        Value::Object(map) => map.into_iter()
            .filter(|(_, child)| child.is_null() == false)
            .map(|(key, child)| (Key::from(key), child))
            .collect(),
        Value::Array(items) => items.into_iter()
            .enumerate()
            .filter(|(_, child)| child.is_null() == false)
            .map(|(index, child)| (Key::from(index.to_string()), child))
            .collect(),
        _ => Vec::new(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_ordered() {
        let keys: Vec<Key> = (0..50).map(|_| Key::generate()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let unique: std::collections::HashSet<&Key> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn serde_key() {
        let key = Key::from("-NxYz12");
        let text = serde_json::to_string(&key).unwrap();
        assert_eq!(text, "\"-NxYz12\"");
        let back: Key = serde_json::from_str(&text).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn children() {
        let children = keyed_children(serde_json::json!({"-b": 2, "-a": 1}));
        assert_eq!(children, vec![(Key::from("-a"), serde_json::json!(1)), (Key::from("-b"), serde_json::json!(2))]);

        let sparse = keyed_children(serde_json::json!([null, "x"]));
        assert_eq!(sparse, vec![(Key::from("1"), serde_json::json!("x"))]);

        assert!(keyed_children(serde_json::Value::Null).is_empty());
    }
}
