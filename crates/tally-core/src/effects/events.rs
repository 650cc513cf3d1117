//! Event emission interface
//!
//! Events are fire-and-forget relative to the caller's response. Handlers
//! publish them to whatever transport the host provides.

use std::sync::Arc;

/// Errors raised by event handlers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// Event name rejected by the handler
    #[error("Invalid event name: {reason}")]
    InvalidName {
        /// Why the name was rejected
        reason: String,
    },

    /// Delivery to the sink failed
    #[error("Delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Sink for contract events
pub trait EventEffects: Send + Sync {
    /// Publish `payload` under `name`
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError>;
}

impl<T: EventEffects + ?Sized> EventEffects for Arc<T> {
    fn emit(&self, name: &str, payload: &[u8]) -> Result<(), EventError> {
        (**self).emit(name, payload)
    }
}
