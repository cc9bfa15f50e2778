//! Named key/value sections of the configuration file.
//!
//! A section keeps its entries in insertion order. Keys compare
//! case-insensitively, so `LeftBracket` and `leftbracket` address the
//! same entry; the spelling of the first write is kept.

use serde::{Deserialize, Serialize};

/// A single `key = value` line inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// An ordered, named group of config entries (e.g. `Bindings`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSection {
    /// Section name, compared case-insensitively.
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ConfigEntry>,
}

impl ConfigSection {
    /// Create an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Set `key` to `value`, replacing an existing entry in place.
    pub fn set_value(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(index) => self.entries[index].value = value.to_string(),
            None => self.entries.push(ConfigEntry {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Remove `key` from the section. Returns `true` if an entry was removed.
    pub fn clear_key(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|i| self.entries[i].value.as_str())
    }

    /// Iterate `(key, value)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the section as `<key> "<value>"` lines.
    pub fn to_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} \"{}\"", e.key, escape_value(&e.value)))
            .collect()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.key.eq_ignore_ascii_case(key))
    }
}

fn escape_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
