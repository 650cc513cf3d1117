//! Allowance registry
//!
//! Standalone bookkeeping of (granter, grantee) amounts under composite keys.
//! `TokenLedger::transfer` does not consult it: no operation spends an
//! allowance yet.

use crate::invocation::Invocation;
use tally_core::composite::{make_composite_key, split_composite_key};
use tally_core::config::ContractConfig;
use tally_core::errors::{Result, TokenError};
use tally_core::AllowanceEntry;

/// Composite-key ledger of allowance amounts
#[derive(Debug, Clone)]
pub struct AllowanceRegistry {
    namespace: String,
}

impl AllowanceRegistry {
    /// Create a registry over the configured namespace
    pub fn new(config: &ContractConfig) -> Self {
        Self {
            namespace: config.allowance_namespace.clone(),
        }
    }

    /// Record `amount` for `(granter, grantee)`, replacing any earlier entry.
    ///
    /// `amount` is stored verbatim.
    pub fn set_allowance(
        &self,
        inv: &mut Invocation<'_>,
        granter: &str,
        grantee: &str,
        amount: &str,
    ) -> Result<()> {
        if granter.is_empty() || grantee.is_empty() {
            return Err(TokenError::validation("id or name cannot be empty"));
        }
        let key = make_composite_key(&self.namespace, &[granter, grantee])
            .map_err(|e| TokenError::validation(format!("invalid allowance key: {e}")))?;

        tracing::debug!(granter, grantee, amount, "Setting allowance");
        inv.put_state(key, amount.as_bytes().to_vec());
        Ok(())
    }

    /// Lazily iterate `granter`'s allowances in key order.
    ///
    /// Each call starts a fresh scan of committed state.
    pub fn allowances<'a>(
        &'a self,
        inv: &Invocation<'a>,
        granter: &'a str,
    ) -> Result<impl Iterator<Item = Result<AllowanceEntry>> + 'a> {
        if granter.is_empty() {
            return Err(TokenError::validation("id cannot be empty"));
        }
        make_composite_key(&self.namespace, &[granter])
            .map_err(|e| TokenError::validation(format!("invalid allowance key: {e}")))?;
        let rows = inv.scan_partial_composite_key(&self.namespace, &[granter])?;

        Ok(rows.map(move |row| {
            let row = row?;
            self.decode_entry(granter, &row.key, row.value)
        }))
    }

    /// Collect `granter`'s allowances in key order
    pub fn list_allowances(
        &self,
        inv: &Invocation<'_>,
        granter: &str,
    ) -> Result<Vec<AllowanceEntry>> {
        let entries = self
            .allowances(inv, granter)?
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(granter, count = entries.len(), "Listed allowances");
        Ok(entries)
    }

    fn decode_entry(&self, granter: &str, key: &str, value: Vec<u8>) -> Result<AllowanceEntry> {
        let (namespace, mut parts) = split_composite_key(key)
            .map_err(|e| TokenError::decode(format!("allowance key: {e}")))?;

        if namespace != self.namespace || parts.len() != 2 || parts[0] != granter {
            return Err(TokenError::decode(format!(
                "unexpected allowance key {}",
                key.escape_debug()
            )));
        }

        let amount = String::from_utf8(value)
            .map_err(|_| TokenError::decode(format!("allowance amount for {granter} is not UTF-8")))?;
        let name = parts.swap_remove(1);
        Ok(AllowanceEntry { name, amount })
    }
}
