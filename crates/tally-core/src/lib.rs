//! Tally Core - token ledger foundation
//!
//! Types, the error model and the effect interfaces shared by every Tally
//! crate. Nothing here performs I/O; handlers live in `tally-effects`.
//!
//! # Modules
//!
//! - `types`: `Address`, `Amount`, `TokenName` and the persisted records
//! - `composite`: composite-key codec and partial-key ranges
//! - `effects`: `StateStoreEffects` and `EventEffects`
//! - `config`: `ContractConfig`
//! - `errors`: `TokenError`

#![forbid(unsafe_code)]

pub mod composite;
pub mod config;
pub mod effects;
pub mod errors;
pub mod types;

pub use composite::{make_composite_key, split_composite_key, CompositeKeyError};
pub use config::{ConfigValidation, ContractConfig, PlaceholderPolicy};
pub use effects::{EventEffects, EventError, KeyValue, StateIter, StateStoreEffects, StoreError, WriteSet};
pub use errors::{Result, TokenError};
pub use types::{Address, AllowanceEntry, Amount, TokenMetadata, TokenName, TransferEvent};
