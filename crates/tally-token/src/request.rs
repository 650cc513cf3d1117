//! Typed requests parsed from positional string arguments
//!
//! All argument-count, emptiness and numeric validation happens here, so the
//! ledger and registry only ever receive well-formed values.

use std::fmt;
use std::str::FromStr;
use tally_core::errors::{Result, TokenError};
use tally_core::{Address, Amount, TokenName};

/// Operation names exposed by `invoke`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `totalSupply(tokenName)`
    TotalSupply,
    /// `balanceOf(address)`
    BalanceOf,
    /// `transfer(caller, recipient, amount)`
    Transfer,
    /// `allowance(id, name, amount)`: records an allowance
    Allowance,
    /// `approve(id)`: lists an id's allowances
    Approve,
    /// Placeholder
    TransferFrom,
    /// Placeholder
    IncreaseAllowance,
    /// Placeholder
    DecreaseAllowance,
    /// Placeholder
    Mint,
    /// Placeholder
    Burn,
}

impl Operation {
    /// Every operation, in dispatch-table order
    pub const ALL: [Operation; 10] = [
        Operation::TotalSupply,
        Operation::BalanceOf,
        Operation::Transfer,
        Operation::Allowance,
        Operation::Approve,
        Operation::TransferFrom,
        Operation::IncreaseAllowance,
        Operation::DecreaseAllowance,
        Operation::Mint,
        Operation::Burn,
    ];

    /// Wire name of the operation
    pub fn name(self) -> &'static str {
        match self {
            Operation::TotalSupply => "totalSupply",
            Operation::BalanceOf => "balanceOf",
            Operation::Transfer => "transfer",
            Operation::Allowance => "allowance",
            Operation::Approve => "approve",
            Operation::TransferFrom => "transferFrom",
            Operation::IncreaseAllowance => "increaseAllowance",
            Operation::DecreaseAllowance => "decreaseAllowance",
            Operation::Mint => "mint",
            Operation::Burn => "burn",
        }
    }

    /// Whether the operation has no ledger semantics yet
    pub fn is_placeholder(self) -> bool {
        matches!(
            self,
            Operation::TransferFrom
                | Operation::IncreaseAllowance
                | Operation::DecreaseAllowance
                | Operation::Mint
                | Operation::Burn
        )
    }
}

impl FromStr for Operation {
    type Err = TokenError;

    fn from_str(name: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == name)
            .ok_or_else(|| TokenError::unsupported_operation(name))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn expect_arity<S: AsRef<str>>(what: &str, args: &[S], expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(TokenError::validation(format!(
            "incorrect number of parameters for {what}: expected {expected}, got {}",
            args.len()
        )));
    }
    Ok(())
}

fn arg<S: AsRef<str>>(args: &[S], index: usize) -> &str {
    args[index].as_ref()
}

/// Arguments of the initialization entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    /// Token name, also the metadata key
    pub token: TokenName,
    /// Ticker symbol
    pub symbol: String,
    /// Recipient of the initial supply
    pub owner: Address,
    /// Initial supply
    pub supply: Amount,
}

impl InitRequest {
    /// Parse `[tokenName, symbol, owner, amount]`
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        expect_arity("init", args, 4)?;
        let (token, symbol, owner, amount) = (
            arg(args, 0),
            arg(args, 1),
            arg(args, 2),
            arg(args, 3),
        );

        let supply = Amount::parse_non_negative("amount", amount)?;
        if token.is_empty() || symbol.is_empty() || owner.is_empty() {
            return Err(TokenError::validation(
                "tokenName or symbol or owner cannot be empty",
            ));
        }
        if owner == token {
            return Err(TokenError::validation("owner cannot be the same as tokenName"));
        }

        Ok(Self {
            token: TokenName::parse(token)?,
            symbol: symbol.to_string(),
            owner: Address::parse(owner)?,
            supply,
        })
    }
}

/// A parsed `invoke` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Read a token's total supply
    TotalSupply {
        /// Token to look up
        token: TokenName,
    },
    /// Read an address's balance
    BalanceOf {
        /// Address to look up
        address: Address,
    },
    /// Move tokens between addresses
    Transfer {
        /// Debited address
        caller: Address,
        /// Credited address
        recipient: Address,
        /// Strictly positive amount
        amount: Amount,
    },
    /// Record an allowance
    SetAllowance {
        /// Granting id
        granter: String,
        /// Grantee name
        grantee: String,
        /// Opaque amount string
        amount: String,
    },
    /// List an id's allowances
    ListAllowances {
        /// Granting id
        granter: String,
    },
    /// One of the operations without ledger semantics
    Placeholder {
        /// Which placeholder was invoked
        operation: Operation,
    },
}

impl Request {
    /// Parse an operation name and its positional arguments.
    ///
    /// Unknown names fail with `TokenError::UnsupportedOperation`.
    pub fn parse<S: AsRef<str>>(function: &str, args: &[S]) -> Result<Self> {
        let operation: Operation = function.parse()?;

        let request = match operation {
            Operation::TotalSupply => {
                expect_arity(function, args, 1)?;
                Request::TotalSupply {
                    token: TokenName::parse(arg(args, 0))?,
                }
            }
            Operation::BalanceOf => {
                expect_arity(function, args, 1)?;
                Request::BalanceOf {
                    address: Address::parse(arg(args, 0))?,
                }
            }
            Operation::Transfer => {
                expect_arity(function, args, 3)?;
                let amount = Amount::parse_positive("transfer amount", arg(args, 2))?;
                Request::Transfer {
                    caller: Address::parse(arg(args, 0))?,
                    recipient: Address::parse(arg(args, 1))?,
                    amount,
                }
            }
            Operation::Allowance => {
                expect_arity(function, args, 3)?;
                Request::SetAllowance {
                    granter: arg(args, 0).to_string(),
                    grantee: arg(args, 1).to_string(),
                    amount: arg(args, 2).to_string(),
                }
            }
            Operation::Approve => {
                expect_arity(function, args, 1)?;
                Request::ListAllowances {
                    granter: arg(args, 0).to_string(),
                }
            }
            // Placeholders accept any arguments.
            op => Request::Placeholder { operation: op },
        };

        Ok(request)
    }

    /// Operation this request was parsed from
    pub fn operation(&self) -> Operation {
        match self {
            Request::TotalSupply { .. } => Operation::TotalSupply,
            Request::BalanceOf { .. } => Operation::BalanceOf,
            Request::Transfer { .. } => Operation::Transfer,
            Request::SetAllowance { .. } => Operation::Allowance,
            Request::ListAllowances { .. } => Operation::Approve,
            Request::Placeholder { operation } => *operation,
        }
    }
}
