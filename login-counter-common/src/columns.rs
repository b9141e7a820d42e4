//! Ordered column mapping for the admin user list.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Column key for the login count.
pub const LOGIN_COUNT_KEY: &str = "login_count";
/// Column key for the last login time.
pub const LAST_LOGIN_KEY: &str = "last_login";

/// Ordered mapping from column key to display label.
///
/// Insertion order is preserved. Inserting an existing key replaces its
/// label without moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    entries: Vec<(String, String)>,
}

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) {
        let key = key.into();
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, l)| (k.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, L: Into<String>> FromIterator<(K, L)> for Columns {
    fn from_iter<I: IntoIterator<Item = (K, L)>>(iter: I) -> Self {
        let mut columns = Columns::new();
        for (key, label) in iter {
            columns.insert(key, label);
        }
        columns
    }
}

impl Serialize for Columns {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, label) in &self.entries {
            map.serialize_entry(key, label)?;
        }
        map.end()
    }
}
