//! Per-invocation transaction context
//!
//! Operations never write to the store directly. They stage writes and at most
//! one event here; `commit` applies the whole write set in one store call and
//! only then emits the event. An operation that returns an error simply drops
//! its `Invocation`, so a failed check can never leave a partial write behind.

use tally_core::effects::{EventEffects, StateIter, StateStoreEffects, WriteSet};
use tally_core::errors::{Result, TokenError};

/// Event staged for emission after commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedEvent {
    /// Event name
    pub name: String,
    /// Serialized payload
    pub payload: Vec<u8>,
}

/// Outcome of a successful commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitSummary {
    /// Number of keys written
    pub keys_written: usize,
    /// Whether an event was emitted
    pub event_emitted: bool,
}

/// Transaction context for one invocation
pub struct Invocation<'a> {
    store: &'a dyn StateStoreEffects,
    writes: WriteSet,
    event: Option<StagedEvent>,
}

impl<'a> Invocation<'a> {
    /// Start an invocation against `store`
    pub fn new(store: &'a dyn StateStoreEffects) -> Self {
        Self {
            store,
            writes: WriteSet::new(),
            event: None,
        }
    }

    /// Read a key, seeing this invocation's own staged writes first
    pub fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(staged) = self.writes.get(key) {
            return Ok(Some(staged.to_vec()));
        }
        Ok(self.store.get_state(key)?)
    }

    /// Stage a write
    pub fn put_state(&mut self, key: impl Into<String>, value: Vec<u8>) {
        let key = key.into();
        tracing::debug!(key = %key.escape_debug(), bytes = value.len(), "Staged write");
        self.writes.put(key, value);
    }

    /// Scan committed composite keys under `namespace` and leading `parts`.
    ///
    /// Staged writes are not visible to scans.
    pub fn scan_partial_composite_key(
        &self,
        namespace: &str,
        parts: &[&str],
    ) -> Result<StateIter<'a>> {
        Ok(self
            .store
            .get_state_by_partial_composite_key(namespace, parts)?)
    }

    /// Stage the invocation's event, replacing any earlier one
    pub fn set_event(&mut self, name: impl Into<String>, payload: Vec<u8>) {
        self.event = Some(StagedEvent {
            name: name.into(),
            payload,
        });
    }

    /// Writes staged so far
    pub fn staged_writes(&self) -> &WriteSet {
        &self.writes
    }

    /// Event staged so far
    pub fn staged_event(&self) -> Option<&StagedEvent> {
        self.event.as_ref()
    }

    /// Apply the staged writes, then emit the staged event.
    ///
    /// A store failure leaves the store untouched and nothing is emitted. An
    /// event failure is reported as `TokenError::Event` after the writes have
    /// already been applied.
    pub fn commit(self, events: &dyn EventEffects) -> Result<CommitSummary> {
        let keys_written = self.writes.len();
        if !self.writes.is_empty() {
            self.store.apply_writes(self.writes)?;
        }

        let event_emitted = match self.event {
            Some(event) => {
                events.emit(&event.name, &event.payload).map_err(|e| {
                    TokenError::event(format!(
                        "failed to emit {} after commit: {}",
                        event.name, e
                    ))
                })?;
                true
            }
            None => false,
        };

        tracing::debug!(keys_written, event_emitted, "Committed invocation");
        Ok(CommitSummary {
            keys_written,
            event_emitted,
        })
    }
}
