//! Store and event sink failures during commit.

#![allow(clippy::unwrap_used, missing_docs)]

use assert_matches::assert_matches;
use tally_core::{ContractConfig, TokenError};
use tally_testkit::{
    balance_of, seeded_store, FailingEventSink, FaultyStateStore, RecordingEventSink,
};
use tally_effects::MemoryStateStore;
use tally_token::{Request, Response, TokenContract};

fn contract() -> TokenContract {
    TokenContract::new(ContractConfig::default()).unwrap()
}

fn faulty_seeded(supply: u64) -> FaultyStateStore {
    FaultyStateStore::new(seeded_store("gold", "GLD", "alice", supply, &[]))
}

#[test]
fn write_failure_leaves_balances_and_emits_nothing() {
    let store = faulty_seeded(100);
    store.fail_writes(true);
    let sink = RecordingEventSink::new();
    let before = store.snapshot();

    let resp = contract().invoke(&store, &sink, "transfer", &["alice", "bob", "30"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Store error"));
    assert_eq!(store.snapshot(), before);
    assert!(sink.is_empty());
}

#[test]
fn read_failure_is_a_store_error() {
    let store = faulty_seeded(100);
    store.fail_reads(true);

    let request = Request::parse("balanceOf", &["alice"]).unwrap();
    assert_matches!(
        contract().execute(&store, &RecordingEventSink::new(), request),
        Err(TokenError::Store { .. })
    );
    assert_eq!(store.write_calls(), 0);
}

#[test]
fn event_failure_reports_error_but_keeps_transfer() {
    let store = faulty_seeded(100);

    let request = Request::parse("transfer", &["alice", "bob", "30"]).unwrap();
    let err = contract()
        .execute(&store, &FailingEventSink, request)
        .unwrap_err();
    assert!(err.is_post_commit());

    assert_eq!(balance_of(&store, "alice"), 70);
    assert_eq!(balance_of(&store, "bob"), 30);
}

#[test]
fn transfer_commits_in_one_write() {
    let store = faulty_seeded(100);
    let resp = contract().invoke(&store, &RecordingEventSink::new(), "transfer", &["alice", "bob", "1"]);
    assert!(resp.is_success());
    assert_eq!(store.write_calls(), 1);
}

#[test]
fn init_write_failure_is_store_error_and_writes_nothing() {
    let store = FaultyStateStore::new(MemoryStateStore::new());
    store.fail_writes(true);
    let sink = RecordingEventSink::new();

    assert_matches!(
        contract().execute_init(&store, &sink, &["gold", "GLD", "alice", "1000"]),
        Err(TokenError::Store { .. })
    );
    let resp = contract().init(&store, &sink, &["gold", "GLD", "alice", "1000"]);
    assert_eq!(resp.status, Response::ERROR);
    assert!(resp.message.starts_with("Store error"));

    assert!(store.snapshot().is_empty());
    assert!(sink.is_empty());
}
