//! File-backed state store handler
//!
//! The whole world state lives in one JSON snapshot file. Every applied write
//! set produces a new snapshot written to a sibling temp file and renamed over
//! the original, so readers of the file never observe a half-applied set.

use super::memory::{check_key, scan};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::effects::{StateIter, StateStoreEffects, StoreError, WriteSet};

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    /// Values are hex-encoded; keys may contain U+0000 and are JSON-escaped.
    entries: BTreeMap<String, String>,
}

/// World state persisted to a JSON snapshot file
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl FileStateStore {
    /// Open the snapshot at `path`, starting empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = if path.exists() {
            Self::load(&path)?
        } else {
            tracing::debug!("No state snapshot at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Snapshot file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn load(path: &Path) -> Result<BTreeMap<String, Vec<u8>>, StoreError> {
        let raw = fs::read(path).map_err(|e| {
            StoreError::ReadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let snapshot: Snapshot = serde_json::from_slice(&raw).map_err(|e| {
            StoreError::Corrupted(format!("Invalid snapshot {}: {}", path.display(), e))
        })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StoreError::Corrupted(format!(
                "Unsupported snapshot version {} in {}",
                snapshot.version,
                path.display()
            )));
        }

        snapshot
            .entries
            .into_iter()
            .map(|(key, value)| {
                hex::decode(&value)
                    .map(|bytes| (key.clone(), bytes))
                    .map_err(|e| StoreError::Corrupted(format!("Invalid value for {key:?}: {e}")))
            })
            .collect()
    }

    fn persist(&self, data: &BTreeMap<String, Vec<u8>>) -> Result<(), StoreError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entries: data
                .iter()
                .map(|(key, value)| (key.clone(), hex::encode(value)))
                .collect(),
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| StoreError::WriteFailed(format!("Failed to encode snapshot: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::WriteFailed(format!("Failed to create directory: {e}"))
            })?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)
            .map_err(|e| StoreError::WriteFailed(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            StoreError::WriteFailed(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(keys = data.len(), "Persisted state snapshot to {}", self.path.display());
        Ok(())
    }
}

impl StateStoreEffects for FileStateStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        check_key(key)?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut writes = WriteSet::new();
        writes.put(key, value);
        self.apply_writes(writes)
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        let entries = scan(&self.data.read(), start, end);
        Ok(Box::new(entries.into_iter().map(Ok)))
    }

    fn apply_writes(&self, writes: WriteSet) -> Result<(), StoreError> {
        for key in writes.keys() {
            check_key(key)?;
        }

        let mut data = self.data.write();
        let mut next = data.clone();
        for (key, value) in writes {
            next.insert(key, value);
        }
        // In-memory state only advances once the snapshot is on disk.
        self.persist(&next)?;
        *data = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStateStore::open(temp_dir.path().join("state.json")).unwrap();
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_writes_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("state.json");

        {
            let store = FileStateStore::open(&path).unwrap();
            store.put_state("alice", b"700".to_vec()).unwrap();
            store
                .put_state("\u{0}insurance\u{0}alice\u{0}bob\u{0}", b"50".to_vec())
                .unwrap();
        }

        let reopened = FileStateStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        assert_eq!(reopened.get_state("alice").unwrap(), Some(b"700".to_vec()));
        assert_eq!(
            reopened
                .get_state("\u{0}insurance\u{0}alice\u{0}bob\u{0}")
                .unwrap(),
            Some(b"50".to_vec())
        );
    }

    #[test]
    fn test_corrupted_snapshot_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, b"{not json").unwrap();

        assert!(matches!(
            FileStateStore::open(&path),
            Err(StoreError::Corrupted(_))
        ));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("state.json");
        fs::write(&path, br#"{"version":9,"entries":{}}"#).unwrap();

        assert!(matches!(
            FileStateStore::open(&path),
            Err(StoreError::Corrupted(_))
        ));
    }
}
