//! World-state fixtures
//!
//! Fixtures write raw records directly so ledger tests can start from a known
//! state without going through the operations under test.

use tally_core::effects::StateStoreEffects;
use tally_core::{Address, Amount, TokenMetadata, TokenName};
use tally_effects::MemoryStateStore;

/// Allowance namespace used by the default contract configuration
pub const ALLOWANCE_NAMESPACE: &str = tally_core::config::DEFAULT_ALLOWANCE_NAMESPACE;

/// A store holding one initialized token plus extra balances
///
/// `owner` receives `supply`; each `(address, balance)` in `balances` is
/// written as-is on top.
pub fn seeded_store(
    token: &str,
    symbol: &str,
    owner: &str,
    supply: u64,
    balances: &[(&str, u64)],
) -> MemoryStateStore {
    let metadata = TokenMetadata {
        name: TokenName::parse(token).unwrap(),
        symbol: symbol.to_string(),
        owner: Address::parse(owner).unwrap(),
        total_supply: Amount::new(supply),
    };

    let store = MemoryStateStore::new();
    store
        .put_state(token, serde_json::to_vec(&metadata).unwrap())
        .unwrap();
    store
        .put_state(owner, Amount::new(supply).encode())
        .unwrap();
    for (address, balance) in balances {
        store
            .put_state(address, Amount::new(*balance).encode())
            .unwrap();
    }
    store
}

/// Raw balance lookup; absent balances read as zero
pub fn balance_of(store: &dyn StateStoreEffects, address: &str) -> u64 {
    store
        .get_state(address)
        .unwrap()
        .map(|bytes| Amount::decode(address, &bytes).unwrap().value())
        .unwrap_or(0)
}
