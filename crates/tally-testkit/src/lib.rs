//! Tally Testing Infrastructure
//!
//! Test doubles for the effect traits, world-state fixtures and proptest
//! strategies shared by the ledger's test suites.
//!
//! ```toml
//! [dev-dependencies]
//! tally-testkit = { workspace = true }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod mocks;
pub mod strategies;

pub use fixtures::{balance_of, seeded_store, ALLOWANCE_NAMESPACE};
pub use mocks::{FailingEventSink, FaultyStateStore, RecordedEvent, RecordingEventSink};
