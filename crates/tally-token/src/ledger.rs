//! Token ledger: metadata, balances and transfers
//!
//! Balances live under the bare address key as canonical decimal strings.
//! Metadata lives under the bare token name as JSON. A missing balance is
//! zero; a missing metadata record is an error.

use crate::invocation::Invocation;
use tally_core::config::ContractConfig;
use tally_core::errors::{Result, TokenError};
use tally_core::{Address, Amount, TokenMetadata, TokenName, TransferEvent};

/// Balance accounting and issuance
#[derive(Debug, Clone)]
pub struct TokenLedger {
    transfer_event_name: String,
}

impl TokenLedger {
    /// Create a ledger emitting transfer events under the configured name
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            transfer_event_name: config.transfer_event_name.clone(),
        }
    }

    /// Write the token's metadata and credit the whole supply to `owner`.
    ///
    /// Overwrites any earlier initialization of the same token; the host is
    /// responsible for running this once. `owner` must differ from `name`,
    /// since both are bare state keys.
    pub fn initialize(
        &self,
        inv: &mut Invocation<'_>,
        name: &TokenName,
        symbol: &str,
        owner: &Address,
        supply: Amount,
    ) -> Result<TokenMetadata> {
        let metadata = TokenMetadata {
            name: name.clone(),
            symbol: symbol.to_string(),
            owner: owner.clone(),
            total_supply: supply,
        };
        let bytes = serde_json::to_vec(&metadata)?;

        inv.put_state(name.as_str(), bytes);
        inv.put_state(owner.as_str(), supply.encode());
        Ok(metadata)
    }

    /// Load a token's metadata record
    pub fn metadata(&self, inv: &Invocation<'_>, name: &TokenName) -> Result<TokenMetadata> {
        let bytes = inv
            .get_state(name.as_str())?
            .ok_or_else(|| TokenError::not_found(format!("token {name} is not initialized")))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| TokenError::decode(format!("metadata of {name}: {e}")))
    }

    /// Amount issued at initialization
    pub fn total_supply(&self, inv: &Invocation<'_>, name: &TokenName) -> Result<Amount> {
        let supply = self.metadata(inv, name)?.total_supply;
        tracing::debug!("{name}'s totalSupply is {supply}");
        Ok(supply)
    }

    /// Balance held by `address`; zero if never written
    pub fn balance_of(&self, inv: &Invocation<'_>, address: &Address) -> Result<Amount> {
        let balance = match inv.get_state(address.as_str())? {
            Some(bytes) => Amount::decode(address.as_str(), &bytes)?,
            None => Amount::ZERO,
        };
        tracing::debug!("{address}'s balance is {balance}");
        Ok(balance)
    }

    /// Move `amount` from `caller` to `recipient` and stage the transfer
    /// event.
    ///
    /// Both balances are read and both new values computed before anything
    /// is staged. A self-transfer still requires `amount` to be covered but
    /// leaves the balance untouched.
    pub fn transfer(
        &self,
        inv: &mut Invocation<'_>,
        caller: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<TransferEvent> {
        let caller_balance = self.balance_of(inv, caller)?;
        let caller_new = caller_balance.checked_sub(amount).ok_or_else(|| {
            TokenError::insufficient_funds(caller.as_str(), caller_balance.value(), amount.value())
        })?;

        if caller != recipient {
            let recipient_balance = self.balance_of(inv, recipient)?;
            let recipient_new = recipient_balance.checked_add(amount).ok_or_else(|| {
                TokenError::overflow(format!(
                    "crediting {amount} to {recipient} would exceed {}",
                    u64::MAX
                ))
            })?;

            inv.put_state(caller.as_str(), caller_new.encode());
            inv.put_state(recipient.as_str(), recipient_new.encode());
        }

        let event = TransferEvent {
            sender: caller.clone(),
            recipient: recipient.clone(),
            amount,
        };
        let payload = serde_json::to_vec(&event)
            .map_err(|e| TokenError::event(format!("failed to encode transfer event: {e}")))?;
        inv.set_event(self.transfer_event_name.as_str(), payload);

        Ok(event)
    }
}
