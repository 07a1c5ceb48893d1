//! Freshness ledger entity
//!
//! Maps deployment id → the freshness marker recorded at the last successful
//! download. It's a pure data structure; persistence lives behind
//! `LedgerRepository`.

use std::collections::BTreeMap;

/// Freshness ledger
///
/// Ordered by id so that two equal ledgers always serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: BTreeMap<String, i64>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Last recorded freshness for an id
    pub fn get(&self, deployment_id: &str) -> Option<i64> {
        self.entries.get(deployment_id).copied()
    }

    /// Record the freshness for an id, replacing any previous value
    pub fn set(&mut self, deployment_id: impl Into<String>, freshness: i64) {
        self.entries.insert(deployment_id.into(), freshness);
    }

    pub fn contains(&self, deployment_id: &str) -> bool {
        self.entries.contains_key(deployment_id)
    }

    /// Apply a batch of updates on top of this ledger and return the result.
    ///
    /// `self` is left untouched; the caller decides whether the merged
    /// snapshot replaces the persisted one.
    pub fn merged<I, K>(&self, updates: I) -> Ledger
    where
        I: IntoIterator<Item = (K, i64)>,
        K: Into<String>,
    {
        let mut merged = self.clone();
        for (id, freshness) in updates {
            merged.set(id, freshness);
        }
        merged
    }

    /// Iterate entries in id order
    pub fn entries(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for Ledger {
    fn from_iter<T: IntoIterator<Item = (K, i64)>>(iter: T) -> Self {
        let mut ledger = Ledger::new();
        for (id, freshness) in iter {
            ledger.set(id, freshness);
        }
        ledger
    }
}
