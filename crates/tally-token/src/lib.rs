//! Tally Token - ERC20-style ledger contract
//!
//! A token ledger (initialization, supply, balances, transfers) and an
//! allowance registry over an injected key-value world state.
//!
//! # Architecture
//!
//! - `request`: positional string arguments parsed into typed requests
//! - `invocation`: per-call write staging with commit-then-emit
//! - `ledger`: metadata, balances and transfers
//! - `allowance`: composite-key allowance bookkeeping
//! - `dispatch`: `TokenContract`, the operation table and `Response`
//!
//! ```ignore
//! let contract = TokenContract::new(ContractConfig::default())?;
//! contract.init(&store, &events, &["gold", "GLD", "alice", "1000"]);
//! let resp = contract.invoke(&store, &events, "transfer", &["alice", "bob", "300"]);
//! assert_eq!(resp.payload_str(), Some("transfer Success"));
//! ```

#![forbid(unsafe_code)]

pub mod allowance;
pub mod dispatch;
pub mod invocation;
pub mod ledger;
pub mod request;

pub use allowance::AllowanceRegistry;
pub use dispatch::{Response, TokenContract, NOT_FOUND_MESSAGE, TRANSFER_SUCCESS};
pub use invocation::{CommitSummary, Invocation, StagedEvent};
pub use ledger::TokenLedger;
pub use request::{InitRequest, Operation, Request};
