//! Init Command Handler

use tally_core::effects::{EventEffects, StateStoreEffects};
use tally_token::{Response, TokenContract};

/// Initialize a token from its four positional fields
pub fn handle_init(
    contract: &TokenContract,
    store: &dyn StateStoreEffects,
    events: &dyn EventEffects,
    args: [&str; 4],
) -> Response {
    tracing::debug!(token = args[0], symbol = args[1], owner = args[2], "Running init");
    contract.init(store, events, &args)
}
