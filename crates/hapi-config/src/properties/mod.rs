//! The `.properties` text format used by both settings layers.
//!
//! [`Properties`] is the parsed form of one file: a map from key to raw
//! string value where, for duplicated keys, the last occurrence wins.  Layers
//! are combined with [`Properties::overlay`].

pub mod parser;

use std::collections::HashMap;

pub use parser::{Entry, PropertiesError};

/// Parsed contents of one properties document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses properties text.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError`] if the text contains a malformed escape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hapi_config::properties::Properties;
    ///
    /// let props = Properties::parse("# defaults\nserver.id=home\n").unwrap();
    /// assert_eq!(props.get("server.id"), Some("home"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, PropertiesError> {
        let entries = parser::parse_entries(text)?
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect();
        Ok(Self { entries })
    }

    /// Raw value for `key`, if present.  Empty values are returned as `Some("")`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copies every entry of `upper` into `self`, replacing same-named
    /// entries.  Returns how many existing entries were replaced.
    pub fn overlay(&mut self, upper: Properties) -> usize {
        let mut replaced = 0;
        for (key, value) in upper.entries {
            if self.entries.insert(key, value).is_some() {
                replaced += 1;
            }
        }
        replaced
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
