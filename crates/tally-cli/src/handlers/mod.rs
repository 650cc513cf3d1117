//! CLI Command Handlers
//!
//! Each subcommand runs one contract call against the configured world state
//! and returns the contract's `Response`; `main` renders it.

use std::io::{self, Write};
use tally_core::effects::{EventEffects, StateStoreEffects};
use tally_token::{Response, TokenContract};

pub mod init;
pub mod invoke;

/// Runs subcommands against one store and event sink
pub struct CliHandler<S, E> {
    contract: TokenContract,
    store: S,
    events: E,
}

impl<S: StateStoreEffects, E: EventEffects> CliHandler<S, E> {
    /// Bind a contract to its world state and event sink
    pub fn new(contract: TokenContract, store: S, events: E) -> Self {
        Self {
            contract,
            store,
            events,
        }
    }

    /// Handle `tally init`
    pub fn handle_init(&self, name: &str, symbol: &str, owner: &str, amount: &str) -> Response {
        init::handle_init(
            &self.contract,
            &self.store,
            &self.events,
            [name, symbol, owner, amount],
        )
    }

    /// Handle `tally invoke`
    pub fn handle_invoke(&self, operation: &str, args: &[String]) -> Response {
        invoke::handle_invoke(&self.contract, &self.store, &self.events, operation, args)
    }

    /// Underlying world state
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release the store and event sink
    pub fn into_parts(self) -> (S, E) {
        (self.store, self.events)
    }
}

/// Print a response: the payload on success, `error <status>: <message>`
/// otherwise
pub fn write_response(
    response: &Response,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<()> {
    if response.is_success() {
        if let Some(payload) = &response.payload {
            out.write_all(payload)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    } else {
        writeln!(err, "error {}: {}", response.status, response.message)?;
        err.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(response: &Response) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        write_response(response, &mut out, &mut err).unwrap();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn success_prints_payload() {
        let (out, err) = render(&Response::success(Some(b"700".to_vec())));
        assert_eq!(out, "700\n");
        assert!(err.is_empty());
    }

    #[test]
    fn empty_success_prints_nothing() {
        let (out, err) = render(&Response::success(None));
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn failure_prints_status_and_message() {
        let response = Response {
            status: 404,
            message: "404 Not Found".to_string(),
            payload: None,
        };
        let (out, err) = render(&response);
        assert!(out.is_empty());
        assert_eq!(err, "error 404: 404 Not Found\n");
    }
}
