//! Effect handler test doubles
//!
//! Uses `parking_lot::Mutex` and atomics: these handlers are driven from one
//! test thread and only need interior mutability behind `&self`.

use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tally_core::effects::{
    EventEffects, EventError, StateIter, StateStoreEffects, StoreError, WriteSet,
};
use tally_core::TransferEvent;
use tally_effects::MemoryStateStore;

/// Memory store with switchable read and write failures
#[derive(Debug, Default)]
pub struct FaultyStateStore {
    inner: MemoryStateStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    write_calls: AtomicUsize,
}

impl FaultyStateStore {
    /// Wrap an existing memory store
    pub fn new(inner: MemoryStateStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    /// Make every subsequent read fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of write calls (`put_state` or `apply_writes`) received,
    /// including failed ones
    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Copy of the underlying state
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.inner.snapshot()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::ReadFailed("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailed("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl StateStoreEffects for FaultyStateStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_read()?;
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.put_state(key, value)
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StoreError> {
        self.check_read()?;
        self.inner.get_state_by_range(start, end)
    }

    fn apply_writes(&self, writes: WriteSet) -> Result<(), StoreError> {
        self.check_write()?;
        self.inner.apply_writes(writes)
    }
}

/// An event captured by `RecordingEventSink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    /// Event name
    pub name: String,
    /// Raw payload
    pub payload: Vec<u8>,
}

impl RecordedEvent {
    /// Decode the payload as a transfer event
    pub fn transfer(&self) -> TransferEvent {
        serde_json::from_slice(&self.payload).expect("payload is not a transfer event")
    }

    /// Decode the payload as generic JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).expect("payload is not JSON")
    }
}

/// Event sink that keeps every emitted event in memory
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingEventSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Events emitted so far, oldest first
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    /// Whether nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventEffects for RecordingEventSink {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        self.events.lock().push(RecordedEvent {
            name: name.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

/// Event sink whose every emission fails
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEventSink;

impl EventEffects for FailingEventSink {
    fn emit(&self, _name: &str, _payload: &[u8]) -> Result<(), EventError> {
        Err(EventError::DeliveryFailed("injected delivery failure".to_string()))
    }
}
