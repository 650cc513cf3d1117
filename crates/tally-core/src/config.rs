//! Contract configuration

use crate::composite::make_composite_key;
use crate::errors::{Result, TokenError};
use serde::{Deserialize, Serialize};

/// Default namespace label for allowance composite keys
pub const DEFAULT_ALLOWANCE_NAMESPACE: &str = "insurance";

/// Default event name for transfer notifications
pub const DEFAULT_TRANSFER_EVENT: &str = "transferEvent";

/// Trait for configuration validation
pub trait ConfigValidation {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;
}

/// How the placeholder operations (`transferFrom`, `increaseAllowance`,
/// `decreaseAllowance`, `mint`, `burn`) respond
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderPolicy {
    /// Succeed with an empty payload and no state change
    #[default]
    Succeed,
    /// Fail with `TokenError::Unimplemented`
    Reject,
}

/// Settings that shape the contract's observable behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Composite-key namespace of the allowance registry
    pub allowance_namespace: String,
    /// Name under which transfer events are emitted
    pub transfer_event_name: String,
    /// Behavior of the placeholder operations
    pub placeholder_policy: PlaceholderPolicy,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            allowance_namespace: DEFAULT_ALLOWANCE_NAMESPACE.to_string(),
            transfer_event_name: DEFAULT_TRANSFER_EVENT.to_string(),
            placeholder_policy: PlaceholderPolicy::default(),
        }
    }
}

impl ConfigValidation for ContractConfig {
    fn validate(&self) -> Result<()> {
        make_composite_key::<&str>(&self.allowance_namespace, &[]).map_err(|e| {
            TokenError::validation(format!("allowance_namespace: {e}"))
        })?;
        if self.transfer_event_name.trim().is_empty() {
            return Err(TokenError::validation("transfer_event_name cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ContractConfig::default();
        assert_eq!(config.allowance_namespace, "insurance");
        assert_eq!(config.transfer_event_name, "transferEvent");
        assert_eq!(config.placeholder_policy, PlaceholderPolicy::Succeed);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: ContractConfig = toml::from_str("placeholder_policy = \"reject\"").unwrap();
        assert_eq!(config.placeholder_policy, PlaceholderPolicy::Reject);
        assert_eq!(config.allowance_namespace, DEFAULT_ALLOWANCE_NAMESPACE);
    }

    #[test]
    fn rejects_unusable_namespace() {
        let config = ContractConfig {
            allowance_namespace: String::new(),
            ..ContractConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ContractConfig {
            allowance_namespace: "a\u{0}b".to_string(),
            ..ContractConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_event_name() {
        let config = ContractConfig {
            transfer_event_name: "  ".to_string(),
            ..ContractConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
