use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;

/// Name-keyed entries with an explicit order.
///
/// Serializes as a JSON object whose keys appear in the stored order.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for KeyedMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> KeyedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(name, _)| name == key).map(|(_, value)| value)
    }

    /// Mutable access to `key`, appending `default()` at the end if it is new.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> V) -> &mut V {
        let index = match self.entries.iter().position(|(name, _)| name == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Replaces the value of an existing key in place, or appends a new entry.
    pub fn insert(&mut self, key: &str, value: V) {
        match self.entries.iter().position(|(name, _)| name == key) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((key.to_string(), value)),
        }
    }

    /// Stable sort of the entries by comparing their keys.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&str, &str) -> Ordering) {
        self.entries.sort_by(|(a, _), (b, _)| compare(a, b));
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for KeyedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
