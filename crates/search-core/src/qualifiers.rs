use std::collections::{BTreeMap, HashSet};

use crate::error::QueryError;
use crate::qualifier::Qualifier;

/// Qualifiers keyed by a human-readable label (`"Stars"`), independent of
/// the serialized key (`"stars"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifiers {
    entries: BTreeMap<String, Qualifier>,
}

impl Qualifiers {
    /// Builds the collection, rejecting empty keys and duplicate labels or keys.
    pub fn from_declarations<I, L>(declarations: I) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = (L, Qualifier)>,
        L: Into<String>,
    {
        let mut entries = BTreeMap::new();
        let mut keys = HashSet::new();

        for (label, qualifier) in declarations {
            let label = label.into();
            if qualifier.key().is_empty() {
                return Err(QueryError::EmptyKey(label));
            }
            if !keys.insert(qualifier.key().to_string()) {
                return Err(QueryError::DuplicateKey(qualifier.key().to_string()));
            }
            if entries.contains_key(&label) {
                return Err(QueryError::DuplicateLabel(label));
            }
            entries.insert(label, qualifier);
        }

        Ok(Self { entries })
    }

    pub fn get(&self, label: &str) -> Option<&Qualifier> {
        self.entries.get(label)
    }

    pub fn get_mut(&mut self, label: &str) -> Option<&mut Qualifier> {
        self.entries.get_mut(label)
    }

    pub fn get_by_key_mut(&mut self, key: &str) -> Option<&mut Qualifier> {
        self.entries
            .values_mut()
            .find(|qualifier| qualifier.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Qualifier)> {
        self.entries
            .iter()
            .map(|(label, qualifier)| (label.as_str(), qualifier))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialized values of the qualifiers that were explicitly set, keyed by `key()`.
    pub fn list_set(&self) -> BTreeMap<String, String> {
        self.entries
            .values()
            .filter(|qualifier| qualifier.is_set())
            .map(|qualifier| (qualifier.key().to_string(), qualifier.to_string()))
            .collect()
    }
}
