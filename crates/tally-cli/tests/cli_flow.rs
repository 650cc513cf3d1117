//! Handler flows against a file-backed world state.

#![allow(clippy::unwrap_used, missing_docs)]

use tally_cli::CliHandler;
use tally_core::{ContractConfig, PlaceholderPolicy};
use tally_effects::{FileStateStore, JsonLinesEventSink};
use tally_testkit::{balance_of, RecordingEventSink};
use tally_token::{Response, TokenContract};
use tempfile::TempDir;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn handler(dir: &TempDir, config: ContractConfig) -> CliHandler<FileStateStore, RecordingEventSink> {
    let store = FileStateStore::open(dir.path().join("state.json")).unwrap();
    CliHandler::new(
        TokenContract::new(config).unwrap(),
        store,
        RecordingEventSink::new(),
    )
}

#[test]
fn state_survives_between_runs() {
    let dir = TempDir::new().unwrap();

    let first = handler(&dir, ContractConfig::default());
    assert!(first.handle_init("gold", "GLD", "alice", "1000").is_success());
    let resp = first.handle_invoke("transfer", &args(&["alice", "bob", "250"]));
    assert!(resp.is_success());
    let (_, events) = first.into_parts();
    assert_eq!(events.events().len(), 1);

    let second = handler(&dir, ContractConfig::default());
    assert_eq!(balance_of(second.store(), "alice"), 750);
    let resp = second.handle_invoke("balanceOf", &args(&["bob"]));
    assert_eq!(resp.payload_str(), Some("250"));
    let resp = second.handle_invoke("totalSupply", &args(&["gold"]));
    assert_eq!(resp.payload_str(), Some("1000"));
}

#[test]
fn failed_invoke_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let handler = handler(&dir, ContractConfig::default());
    handler.handle_init("gold", "GLD", "alice", "10");
    let before = std::fs::read(dir.path().join("state.json")).unwrap();

    let resp = handler.handle_invoke("transfer", &args(&["alice", "bob", "11"]));
    assert_eq!(resp.status, Response::ERROR);
    assert_eq!(std::fs::read(dir.path().join("state.json")).unwrap(), before);
}

#[test]
fn unknown_operation_and_rejected_placeholder() {
    let dir = TempDir::new().unwrap();
    let config = ContractConfig {
        placeholder_policy: PlaceholderPolicy::Reject,
        ..ContractConfig::default()
    };
    let handler = handler(&dir, config);

    assert_eq!(handler.handle_invoke("nope", &[]).status, Response::NOT_FOUND);
    assert_eq!(
        handler.handle_invoke("mint", &args(&["alice", "5"])).status,
        Response::NOT_IMPLEMENTED
    );
}

#[test]
fn events_are_written_as_json_lines() {
    let dir = TempDir::new().unwrap();
    let store = FileStateStore::open(dir.path().join("state.json")).unwrap();
    let handler = CliHandler::new(
        TokenContract::new(ContractConfig::default()).unwrap(),
        store,
        JsonLinesEventSink::new(Vec::new()),
    );
    handler.handle_init("gold", "GLD", "alice", "100");
    handler.handle_invoke("transfer", &args(&["alice", "bob", "5"]));

    let (_, sink) = handler.into_parts();
    let output = String::from_utf8(sink.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![serde_json::json!({
            "event": "transferEvent",
            "payload": {"sender": "alice", "recipient": "bob", "amount": 5}
        })]
    );
}
