//! Property test strategies for ledger types
//!
//! Addresses are drawn from a small pool so that generated transfer
//! sequences hit the same accounts repeatedly.

use proptest::prelude::*;

pub use proptest;

/// Address pool used by `arb_address`
pub const ADDRESS_POOL: &[&str] = &["alice", "bob", "carol", "dave", "erin"];

/// Strategy for an address from the shared pool
pub fn arb_address() -> impl Strategy<Value = String> {
    prop::sample::select(ADDRESS_POOL).prop_map(str::to_string)
}

/// Strategy for a transfer amount, biased toward small values
pub fn arb_transfer_amount() -> impl Strategy<Value = u64> {
    prop_oneof![
        4 => 1u64..=500,
        1 => 501u64..=100_000,
    ]
}

/// Strategy for a sequence of `(caller, recipient, amount)` transfers
pub fn arb_transfers(max: usize) -> impl Strategy<Value = Vec<(String, String, u64)>> {
    prop::collection::vec((arb_address(), arb_address(), arb_transfer_amount()), 0..max)
}
