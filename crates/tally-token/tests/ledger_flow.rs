//! End-to-end ledger behavior through the dispatch surface.

#![allow(clippy::unwrap_used, missing_docs)]

use assert_matches::assert_matches;
use tally_core::{Address, Amount, ContractConfig, StateStoreEffects, TokenError, TransferEvent};
use tally_effects::MemoryStateStore;
use tally_testkit::{balance_of, seeded_store, RecordingEventSink};
use tally_token::{Response, TokenContract, TRANSFER_SUCCESS};

fn contract() -> TokenContract {
    TokenContract::new(ContractConfig::default()).unwrap()
}

#[test]
fn init_then_read_supply_and_balance() {
    let store = MemoryStateStore::new();
    let sink = RecordingEventSink::new();
    let contract = contract();

    let resp = contract.init(&store, &sink, &["gold", "GLD", "alice", "1000"]);
    assert_eq!(resp, Response::success(None));
    assert!(sink.is_empty());

    let supply = contract.invoke(&store, &sink, "totalSupply", &["gold"]);
    assert!(supply.is_success());
    assert_eq!(supply.payload_str(), Some("1000"));

    let balance = contract.invoke(&store, &sink, "balanceOf", &["alice"]);
    assert_eq!(balance.payload_str(), Some("1000"));
}

#[test]
fn metadata_is_stored_as_json() {
    let store = MemoryStateStore::new();
    contract().init(&store, &RecordingEventSink::new(), &["gold", "GLD", "alice", "1000"]);

    let raw = store.get_state("gold").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "name": "gold",
            "symbol": "GLD",
            "owner": "alice",
            "totalSupply": 1000
        })
    );
}

#[test]
fn init_with_three_arguments_writes_nothing() {
    let store = MemoryStateStore::new();
    let contract = contract();

    let resp = contract.init(&store, &RecordingEventSink::new(), &["gold", "GLD", "alice"]);
    assert_eq!(resp.status, Response::ERROR);
    assert_matches!(
        contract.execute_init(&store, &RecordingEventSink::new(), &["gold", "GLD", "alice"]),
        Err(TokenError::Validation { .. })
    );
    assert!(store.is_empty());
}

#[test]
fn init_rejects_negative_supply() {
    let store = MemoryStateStore::new();
    let resp = contract().init(&store, &RecordingEventSink::new(), &["gold", "GLD", "alice", "-5"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.contains("amount must be a number"));
    assert!(store.is_empty());
}

#[test]
fn transfer_moves_balance_and_emits_event() {
    let store = seeded_store("gold", "GLD", "alice", 1000, &[]);
    let sink = RecordingEventSink::new();

    let resp = contract().invoke(&store, &sink, "transfer", &["alice", "bob", "300"]);
    assert!(resp.is_success());
    assert_eq!(resp.payload_str(), Some(TRANSFER_SUCCESS));

    assert_eq!(balance_of(&store, "alice"), 700);
    assert_eq!(balance_of(&store, "bob"), 300);

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "transferEvent");
    assert_eq!(
        events[0].json(),
        serde_json::json!({"sender": "alice", "recipient": "bob", "amount": 300})
    );
    assert_eq!(
        events[0].transfer(),
        TransferEvent {
            sender: Address::parse("alice").unwrap(),
            recipient: Address::parse("bob").unwrap(),
            amount: Amount::new(300),
        }
    );
}

#[test]
fn transfer_with_insufficient_funds_changes_nothing() {
    let store = seeded_store("gold", "GLD", "alice", 10, &[]);
    let sink = RecordingEventSink::new();
    let before = store.snapshot();

    let resp = contract().invoke(&store, &sink, "transfer", &["alice", "bob", "11"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Insufficient funds"));
    assert_eq!(store.snapshot(), before);
    assert!(sink.is_empty());
}

#[test]
fn transfer_rejects_non_positive_and_non_numeric_amounts() {
    let store = seeded_store("gold", "GLD", "alice", 10, &[]);
    let sink = RecordingEventSink::new();
    let contract = contract();
    let before = store.snapshot();

    for amount in ["0", "-3", "ten", "", "1.5"] {
        let req = tally_token::Request::parse("transfer", &["alice", "bob", amount]);
        assert_matches!(req, Err(TokenError::Validation { .. }), "amount {amount:?}");

        let resp = contract.invoke(&store, &sink, "transfer", &["alice", "bob", amount]);
        assert_eq!(resp.status, Response::ERROR);
    }
    assert_eq!(store.snapshot(), before);
    assert!(sink.is_empty());
}

#[test]
fn transfer_from_unfunded_caller_is_insufficient() {
    let store = seeded_store("gold", "GLD", "alice", 10, &[]);
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "transfer", &["zed", "bob", "1"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Insufficient funds"));
}

#[test]
fn self_transfer_does_not_mint() {
    let store = seeded_store("gold", "GLD", "alice", 100, &[]);
    let sink = RecordingEventSink::new();

    let resp = contract().invoke(&store, &sink, "transfer", &["alice", "alice", "40"]);
    assert!(resp.is_success());
    assert_eq!(balance_of(&store, "alice"), 100);
    assert_eq!(sink.events().len(), 1);
}

#[test]
fn unwritten_address_has_zero_balance() {
    let store = seeded_store("gold", "GLD", "alice", 100, &[]);
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "balanceOf", &["nobody"]);
    assert_eq!(resp.payload_str(), Some("0"));
}

#[test]
fn corrupted_balance_is_a_decode_error() {
    let store = MemoryStateStore::with_entries([("alice", b"lots".to_vec())]);
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "balanceOf", &["alice"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Decode error"));
}

#[test]
fn supply_of_unknown_token_is_not_found() {
    let store = MemoryStateStore::new();
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "totalSupply", &["gold"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Not found"));
}

#[test]
fn supply_of_malformed_metadata_is_a_decode_error() {
    let store = MemoryStateStore::with_entries([("gold", b"not json".to_vec())]);
    let request = tally_token::Request::parse("totalSupply", &["gold"]).unwrap();

    assert_matches!(
        contract().execute(&store, &RecordingEventSink::new(), request),
        Err(TokenError::Decode { .. })
    );
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "totalSupply", &["gold"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Decode error"));
}

#[test]
fn init_rejects_owner_equal_to_token_name() {
    let store = MemoryStateStore::new();
    let contract = contract();

    let resp = contract.init(&store, &RecordingEventSink::new(), &["gold", "GLD", "gold", "10"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(store.is_empty());
}

#[test]
fn transfer_to_token_name_leaves_metadata_intact() {
    let store = seeded_store("gold", "GLD", "alice", 100, &[]);
    let contract = contract();

    let resp = contract.invoke(&store, &RecordingEventSink::new(), "transfer", &["alice", "gold", "5"]);
    assert_eq!(resp.status, Response::ERROR);
    assert_eq!(balance_of(&store, "alice"), 100);

    let supply = contract.invoke(&store, &RecordingEventSink::new(), "totalSupply", &["gold"]);
    assert_eq!(supply.payload_str(), Some("100"));
}
