//! World-state effect interface
//!
//! The ledger never owns persisted bytes. Every read and write goes through a
//! `StateStoreEffects` handler supplied by the host for the current invocation.

use crate::composite::partial_key_range;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Errors raised by state store handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Key rejected by the handler
    #[error("Invalid key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// Backend read failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Backend write failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Persisted state could not be loaded
    #[error("Corrupted state: {0}")]
    Corrupted(String),
}

/// A key and its stored value, as yielded by range scans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// State key
    pub key: String,
    /// Stored bytes
    pub value: Vec<u8>,
}

/// Iterator over a key range, in ascending key order
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<KeyValue, StoreError>> + Send + 'a>;

/// Writes staged by one invocation, applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    writes: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    /// Create an empty write set
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a write; a later write to the same key replaces the earlier one
    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), value);
    }

    /// Staged value for a key, if any
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.writes.get(key).map(Vec::as_slice)
    }

    /// Number of staged keys
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether nothing is staged
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Staged keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.writes.keys().map(String::as_str)
    }
}

impl IntoIterator for WriteSet {
    type Item = (String, Vec<u8>);
    type IntoIter = btree_map::IntoIter<String, Vec<u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// Key-value world state
pub trait StateStoreEffects: Send + Sync {
    /// Read the value stored under `key`; `None` when absent
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write `value` under `key`
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Iterate all keys in `[start, end)` in ascending order
    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError>;

    /// Apply a staged write set.
    ///
    /// Handlers that can apply the whole set atomically should override this;
    /// the default writes keys one by one.
    fn apply_writes(&self, writes: WriteSet) -> Result<(), StoreError> {
        for (key, value) in writes {
            self.put_state(&key, value)?;
        }
        Ok(())
    }

    /// Iterate all composite keys in `namespace` whose leading components
    /// equal `parts`
    fn get_state_by_partial_composite_key(
        &self,
        namespace: &str,
        parts: &[&str],
    ) -> Result<StateIter<'_>, StoreError> {
        let (start, end) = partial_key_range(namespace, parts).map_err(|e| {
            StoreError::InvalidKey {
                reason: e.to_string(),
            }
        })?;
        self.get_state_by_range(&start, &end)
    }
}

impl<T: StateStoreEffects + ?Sized> StateStoreEffects for Arc<T> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        (**self).put_state(key, value)
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        (**self).get_state_by_range(start, end)
    }

    fn apply_writes(&self, writes: WriteSet) -> Result<(), StoreError> {
        (**self).apply_writes(writes)
    }
}
