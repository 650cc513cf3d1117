//! Invoke Command Handler

use tally_core::effects::{EventEffects, StateStoreEffects};
use tally_token::{Response, TokenContract};

/// Invoke a named contract operation with positional arguments
pub fn handle_invoke(
    contract: &TokenContract,
    store: &dyn StateStoreEffects,
    events: &dyn EventEffects,
    operation: &str,
    args: &[String],
) -> Response {
    tracing::debug!(operation, argc = args.len(), "Running invoke");
    contract.invoke(store, events, operation, args)
}
