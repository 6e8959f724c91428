//! Per-element options mapping
//!
//!     Options are string key/value pairs attached to every element. Iteration follows
//!     insertion order so a renderer re-emits attributes deterministically, but equality is
//!     semantic: two mappings with the same entries in a different order are equal.
//!
//!     The empty key `""` is reserved for an element's positional argument (a macro's leading
//!     unnamed value, a block style like `mermaid`).

use linked_hash_map::LinkedHashMap;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Options(LinkedHashMap<String, String>);

impl Options {
    pub fn new() -> Self {
        Self(LinkedHashMap::new())
    }

    /// Builder style insertion, mostly useful to write expected trees in tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Set a value, an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.get_mut(&key) {
            Some(existing) => *existing = value,
            None => {
                self.0.insert(key, value);
            }
        }
    }

    /// Set a value only when the key is not there yet, the first value wins.
    pub fn insert_if_absent(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.0.contains_key(&key) {
            self.0.insert(key, value.into());
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Add every entry of `other`, overriding existing keys.
    pub fn merge(&mut self, other: &Options) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    /// Add the entries of `other` whose key is not already set.
    pub fn merge_under(&mut self, other: &Options) {
        for (key, value) in other.iter() {
            self.insert_if_absent(key, value);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains_value(&self, value: &str) -> bool {
        self.0.values().any(|it| it == value)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn role(&self) -> Option<&str> {
        self.get("role")
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    /// Append a role to the space separated `role` entry.
    pub fn add_role(&mut self, role: &str) {
        let roles = match self.role() {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, role),
            _ => role.to_string(),
        };
        self.insert("role", roles);
    }
}

impl PartialEq for Options {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for Options {}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Options {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_order() {
        let a = Options::from([("role", "x"), ("id", "y")]);
        let b = Options::from([("id", "y"), ("role", "x")]);
        assert_eq!(a, b);
        assert_ne!(a, Options::from([("id", "y")]));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut options = Options::new();
        options.insert("b", "1");
        options.insert("a", "2");
        options.insert("b", "3");
        let keys: Vec<_> = options.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(options.get("b"), Some("3"));
    }

    #[test]
    fn first_value_wins_with_insert_if_absent() {
        let mut options = Options::new();
        options.insert_if_absent("", "first");
        options.insert_if_absent("", "second");
        assert_eq!(options.get(""), Some("first"));
    }

    #[test]
    fn add_role_appends() {
        let mut options = Options::new();
        options.add_role("a");
        options.add_role("inline-code");
        assert_eq!(options.role(), Some("a inline-code"));
    }

    #[test]
    fn serializes_as_a_map() {
        let options = Options::from([("role", "x"), ("id", "y")]);
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"role":"x","id":"y"}"#);
    }
}
