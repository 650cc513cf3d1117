//! Effect trait definitions
//!
//! This module defines **what** side effects the ledger performs; handlers in
//! `tally-effects` (and test doubles in `tally-testkit`) define **how**.
//!
//! - **State**: key-value world state with ordered range scans
//! - **Events**: post-commit notifications

pub mod events;
pub mod state;

pub use events::{EventEffects, EventError};
pub use state::{KeyValue, StateIter, StateStoreEffects, StoreError, WriteSet};
