//! Operation dispatch
//!
//! `TokenContract` is the contract's outer surface: it parses positional
//! string arguments into a typed `Request`, runs the request inside a fresh
//! `Invocation`, commits on success and folds the outcome into a `Response`.

use crate::allowance::AllowanceRegistry;
use crate::invocation::Invocation;
use crate::ledger::TokenLedger;
use crate::request::{InitRequest, Operation, Request};
use tally_core::config::{ConfigValidation, ContractConfig, PlaceholderPolicy};
use tally_core::effects::{EventEffects, StateStoreEffects};
use tally_core::errors::{Result, TokenError};

/// Payload returned by a successful transfer
pub const TRANSFER_SUCCESS: &str = "transfer Success";

/// Message of the unknown-operation response
pub const NOT_FOUND_MESSAGE: &str = "404 Not Found";

/// Result of one contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP-like status code
    pub status: u16,
    /// Error description; empty on success
    pub message: String,
    /// Operation output, if any
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Operation succeeded
    pub const OK: u16 = 200;
    /// Unknown operation name
    pub const NOT_FOUND: u16 = 404;
    /// Operation failed
    pub const ERROR: u16 = 500;
    /// Placeholder operation rejected by configuration
    pub const NOT_IMPLEMENTED: u16 = 501;

    /// Successful response carrying `payload`
    pub fn success(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Self::OK,
            message: String::new(),
            payload,
        }
    }

    /// Failed response describing `err`
    pub fn from_error(err: &TokenError) -> Self {
        let (status, message) = match err {
            TokenError::UnsupportedOperation { .. } => {
                (Self::NOT_FOUND, NOT_FOUND_MESSAGE.to_string())
            }
            TokenError::Unimplemented { .. } => (Self::NOT_IMPLEMENTED, err.to_string()),
            _ => (Self::ERROR, err.to_string()),
        };
        Self {
            status,
            message,
            payload: None,
        }
    }

    /// Whether the status is 200
    pub fn is_success(&self) -> bool {
        self.status == Self::OK
    }

    /// Payload as UTF-8 text, if present and valid
    pub fn payload_str(&self) -> Option<&str> {
        self.payload
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl From<Result<Option<Vec<u8>>>> for Response {
    fn from(result: Result<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(err) => Response::from_error(&err),
        }
    }
}

/// The token contract: ledger plus allowance registry behind one dispatch
/// table
#[derive(Debug, Clone)]
pub struct TokenContract {
    config: ContractConfig,
    ledger: TokenLedger,
    registry: AllowanceRegistry,
}

impl TokenContract {
    /// Build a contract from a validated configuration
    pub fn new(config: ContractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ledger: TokenLedger::new(&config),
            registry: AllowanceRegistry::new(&config),
            config,
        })
    }

    /// Initialization entry point: `[tokenName, symbol, owner, amount]`
    pub fn init<S: AsRef<str>>(
        &self,
        store: &dyn StateStoreEffects,
        events: &dyn EventEffects,
        args: &[S],
    ) -> Response {
        let span = tracing::info_span!("invoke", operation = "init");
        let _guard = span.enter();

        let result = self.execute_init(store, events, args);
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Initialization rejected");
        }
        result.into()
    }

    /// Invoke `function` with positional `args`
    pub fn invoke<S: AsRef<str>>(
        &self,
        store: &dyn StateStoreEffects,
        events: &dyn EventEffects,
        function: &str,
        args: &[S],
    ) -> Response {
        let span = tracing::info_span!("invoke", operation = function);
        let _guard = span.enter();

        let result =
            Request::parse(function, args).and_then(|req| self.execute(store, events, req));
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Invocation rejected");
        }
        result.into()
    }

    /// Run initialization, returning the typed outcome
    pub fn execute_init<S: AsRef<str>>(
        &self,
        store: &dyn StateStoreEffects,
        events: &dyn EventEffects,
        args: &[S],
    ) -> Result<Option<Vec<u8>>> {
        let req = InitRequest::parse(args)?;
        let mut inv = Invocation::new(store);
        let metadata = self
            .ledger
            .initialize(&mut inv, &req.token, &req.symbol, &req.owner, req.supply)?;
        inv.commit(events)?;

        tracing::info!(
            token = %metadata.name,
            owner = %metadata.owner,
            supply = %metadata.total_supply,
            "Token initialized"
        );
        Ok(None)
    }

    /// Run a parsed request, returning its payload
    pub fn execute(
        &self,
        store: &dyn StateStoreEffects,
        events: &dyn EventEffects,
        request: Request,
    ) -> Result<Option<Vec<u8>>> {
        let mut inv = Invocation::new(store);

        let payload = match request {
            Request::TotalSupply { token } => {
                let supply = self.ledger.total_supply(&inv, &token)?;
                Some(serde_json::to_vec(&supply.value())?)
            }
            Request::BalanceOf { address } => {
                let balance = self.ledger.balance_of(&inv, &address)?;
                Some(balance.to_string().into_bytes())
            }
            Request::Transfer {
                caller,
                recipient,
                amount,
            } => {
                let event = self.ledger.transfer(&mut inv, &caller, &recipient, amount)?;
                inv.commit(events)?;
                tracing::info!(
                    sender = %event.sender,
                    recipient = %event.recipient,
                    amount = %event.amount,
                    "Transfer committed"
                );
                return Ok(Some(TRANSFER_SUCCESS.as_bytes().to_vec()));
            }
            Request::SetAllowance {
                granter,
                grantee,
                amount,
            } => {
                self.registry
                    .set_allowance(&mut inv, &granter, &grantee, &amount)?;
                None
            }
            Request::ListAllowances { granter } => {
                let entries = self.registry.list_allowances(&inv, &granter)?;
                Some(serde_json::to_vec(&entries)?)
            }
            Request::Placeholder { operation } => return self.placeholder(operation),
        };

        inv.commit(events)?;
        Ok(payload)
    }

    fn placeholder(&self, operation: Operation) -> Result<Option<Vec<u8>>> {
        match self.config.placeholder_policy {
            PlaceholderPolicy::Succeed => {
                tracing::warn!(%operation, "Operation is not implemented; returning empty success");
                Ok(None)
            }
            PlaceholderPolicy::Reject => Err(TokenError::unimplemented(operation.name())),
        }
    }
}
