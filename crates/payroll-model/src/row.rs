use std::collections::BTreeMap;

use crate::Field;

/// One ingested record before header normalization.
///
/// Keys keep their upstream spelling and their insertion order; the order
/// matters because two raw keys can normalize to the same canonical field and
/// the later one wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    entries: Vec<(String, Option<String>)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a present value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, Some(value.into()));
        self
    }

    /// Builder-style insert of an absent (`null`) value.
    pub fn with_absent(mut self, key: impl Into<String>) -> Self {
        self.push(key, None);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// First value stored under exactly `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = RawRow::new();
        for (k, v) in iter {
            row.push(k, Some(v.into()));
        }
        row
    }
}

/// A [`RawRow`] whose keys were rewritten to canonical field names.
///
/// Keys without an alias entry are carried through verbatim. Each key appears
/// at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalRow {
    values: BTreeMap<String, Option<String>>,
}

impl CanonicalRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under `key`, replacing any earlier value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        self.values.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Value of a canonical field, `None` when the key is missing or null.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.get_key(field.as_str())
    }

    /// Value stored under an arbitrary (possibly pass-through) key.
    pub fn get_key(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_deref())
    }

    /// Like [`get`](Self::get) but also treats the empty string as absent.
    pub fn non_empty(&self, field: Field) -> Option<&str> {
        self.get(field).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}
