//! Tally Effects - production effect handlers
//!
//! Implementations of the `tally-core` effect traits. Handlers are stateless
//! with respect to the ledger: they store bytes and deliver events, nothing
//! more. Test doubles with fault injection live in `tally-testkit`.

#![forbid(unsafe_code)]

pub mod events;
pub mod state;

pub use events::{JsonLinesEventSink, TracingEventSink};
pub use state::{FileStateStore, MemoryStateStore};
