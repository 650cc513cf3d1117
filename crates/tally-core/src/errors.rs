//! Unified error type for token ledger operations
//!
//! Every failure an operation can report maps onto one `TokenError` variant.
//! Handler-level errors (`StoreError`, `EventError`) convert into it with `From`.

use crate::effects::{EventError, StoreError};

/// Error type for all ledger operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// Wrong argument count, empty required field, or malformed amount
    #[error("Invalid: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// Referenced record is absent
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found
        message: String,
    },

    /// Stored bytes do not parse as expected
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the malformed record
        message: String,
    },

    /// Underlying read or write failed
    #[error("Store error: {message}")]
    Store {
        /// Description of the storage failure
        message: String,
    },

    /// Transfer would drive the caller's balance negative
    #[error("Insufficient funds: {address} holds {balance}, transfer requires {requested}")]
    InsufficientFunds {
        /// Address being debited
        address: String,
        /// Balance before the transfer
        balance: u64,
        /// Requested transfer amount
        requested: u64,
    },

    /// Balance arithmetic left the u64 range
    #[error("Overflow: {message}")]
    Overflow {
        /// Description of the overflowing computation
        message: String,
    },

    /// Post-commit notification failed
    #[error("Event error: {message}")]
    Event {
        /// Description of the emission failure
        message: String,
    },

    /// Operation name is not part of the contract surface
    #[error("Unsupported operation: {operation}")]
    UnsupportedOperation {
        /// The rejected operation name
        operation: String,
    },

    /// Placeholder operation rejected by configuration
    #[error("Unimplemented operation: {operation}")]
    Unimplemented {
        /// The placeholder operation name
        operation: String,
    },
}

impl TokenError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create an insufficient funds error
    pub fn insufficient_funds(address: impl Into<String>, balance: u64, requested: u64) -> Self {
        Self::InsufficientFunds {
            address: address.into(),
            balance,
            requested,
        }
    }

    /// Create an overflow error
    pub fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow {
            message: message.into(),
        }
    }

    /// Create an event error
    pub fn event(message: impl Into<String>) -> Self {
        Self::Event {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported_operation(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }

    /// Create an unimplemented operation error
    pub fn unimplemented(operation: impl Into<String>) -> Self {
        Self::Unimplemented {
            operation: operation.into(),
        }
    }

    /// Whether the failure happened after the write set was committed.
    ///
    /// Only event delivery fails post-commit; every other kind is raised
    /// before the first write.
    pub fn is_post_commit(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

/// Standard Result type for ledger operations
pub type Result<T> = std::result::Result<T, TokenError>;

impl From<StoreError> for TokenError {
    fn from(err: StoreError) -> Self {
        Self::store(err.to_string())
    }
}

impl From<EventError> for TokenError {
    fn from(err: EventError) -> Self {
        Self::event(err.to_string())
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
