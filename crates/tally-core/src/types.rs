//! Strongly typed ledger values
//!
//! String arguments from the dispatch boundary are parsed into these types once;
//! the ledger operations never see raw strings for addresses or amounts.

use crate::composite::COMPOSITE_KEY_DELIMITER;
use crate::errors::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;

fn validate_simple_key(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(TokenError::validation(format!("{field} cannot be empty")));
    }
    if value.starts_with(COMPOSITE_KEY_DELIMITER) {
        return Err(TokenError::validation(format!(
            "{field} must not start with U+0000"
        )));
    }
    Ok(())
}

/// Account address; doubles as the state key of its balance
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address from a dispatch argument
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_simple_key("address", &value)?;
        Ok(Self(value))
    }

    /// Borrow the address as a state key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Address {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token name; the state key of the token's metadata record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenName(String);

impl TokenName {
    /// Parse a token name from a dispatch argument
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        validate_simple_key("tokenName", &value)?;
        Ok(Self(value))
    }

    /// Borrow the name as a state key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TokenName {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<TokenName> for String {
    fn from(name: TokenName) -> Self {
        name.0
    }
}

impl fmt::Display for TokenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token quantity
///
/// Balances are persisted as canonical decimal ASCII. All arithmetic is
/// checked; callers turn `None` into an explicit error.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount, used for absent balances
    pub const ZERO: Amount = Amount(0);

    /// Wrap a raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw value
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Parse a non-negative amount (digits only).
    pub fn parse_non_negative(field: &str, raw: &str) -> Result<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::validation(format!(
                "{field} must be a number or {field} cannot be negative"
            )));
        }
        raw.parse::<u64>()
            .map(Self)
            .map_err(|_| TokenError::validation(format!("{field} exceeds the maximum amount")))
    }

    /// Parse a strictly positive amount.
    ///
    /// A leading sign is accepted so that `-5` is reported as non-positive
    /// rather than non-numeric.
    pub fn parse_positive(field: &str, raw: &str) -> Result<Self> {
        let (negative, digits) = match raw.as_bytes().first() {
            Some(b'-') => (true, &raw[1..]),
            Some(b'+') => (false, &raw[1..]),
            _ => (false, raw),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::validation(format!("{field} must be integer")));
        }
        if negative || digits.bytes().all(|b| b == b'0') {
            return Err(TokenError::validation(format!("{field} must be positive")));
        }
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TokenError::validation(format!("{field} exceeds the maximum amount")))
    }

    /// Decode a persisted balance.
    pub fn decode(key: &str, bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| TokenError::decode(format!("balance of {key} is not UTF-8")))?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::decode(format!(
                "balance of {key} is not a non-negative integer: {text:?}"
            )));
        }
        text.parse::<u64>()
            .map(Self)
            .map_err(|_| TokenError::decode(format!("balance of {key} exceeds u64: {text}")))
    }

    /// Canonical persisted form
    pub fn encode(self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }

    /// Checked addition
    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction; `None` when the result would be negative
    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Token metadata, stored as JSON under the token name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    /// Token name
    pub name: TokenName,
    /// Ticker symbol
    pub symbol: String,
    /// Address that received the initial supply
    pub owner: Address,
    /// Amount issued at initialization
    pub total_supply: Amount,
}

/// Notification published after a committed transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEvent {
    /// Debited address
    pub sender: Address,
    /// Credited address
    pub recipient: Address,
    /// Transferred amount
    pub amount: Amount,
}

/// One row of an allowance listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceEntry {
    /// Grantee name
    pub name: String,
    /// Raw stored amount
    pub amount: String,
}
