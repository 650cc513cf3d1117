//! In-memory state store handler

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tally_core::effects::{KeyValue, StateIter, StateStoreEffects, StoreError, WriteSet};

/// In-memory world state
///
/// Keys are kept ordered so range scans return entries in ascending key
/// order, matching what a ledger peer's state database yields.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<u8>)>,
        K: Into<String>,
    {
        let data = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self {
            data: RwLock::new(data),
        }
    }

    /// Copy of the full state, in key order
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.data.read().clone()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

pub(crate) fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey {
            reason: "key cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn scan(data: &BTreeMap<String, Vec<u8>>, start: &str, end: &str) -> Vec<KeyValue> {
    if start >= end {
        return Vec::new();
    }
    data.range::<str, _>((
        std::ops::Bound::Included(start),
        std::ops::Bound::Excluded(end),
    ))
    .map(|(key, value)| KeyValue {
        key: key.clone(),
        value: value.clone(),
    })
    .collect()
}

impl StateStoreEffects for MemoryStateStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        check_key(key)?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key)?;
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        // Snapshot under the read lock; the iterator never holds it.
        let entries = scan(&self.data.read(), start, end);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn apply_writes(&self, writes: WriteSet) -> Result<(), StoreError> {
        for key in writes.keys() {
            check_key(key)?;
        }
        let mut data = self.data.write();
        for (key, value) in writes {
            data.insert(key, value);
        }
        Ok(())
    }
}
