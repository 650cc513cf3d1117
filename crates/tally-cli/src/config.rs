//! CLI configuration
//!
//! Precedence, lowest first: built-in defaults, the TOML file, environment
//! variables, command-line flags. Flags are applied by `main`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tally_core::config::{ConfigValidation, ContractConfig};
use tally_core::effects::EventEffects;
use tally_effects::{JsonLinesEventSink, TracingEventSink};

/// Overrides `state_path`
pub const STATE_PATH_ENV: &str = "TALLY_STATE_PATH";

/// Overrides `log_level`
pub const LOG_ENV: &str = "TALLY_LOG";

/// Where emitted contract events go
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EventOutput {
    /// JSON lines on stdout
    #[default]
    Stdout,
    /// The tracing log on stderr
    Log,
}

impl EventOutput {
    /// Build the matching event sink
    pub fn sink(self) -> Arc<dyn EventEffects> {
        match self {
            EventOutput::Stdout => Arc::new(JsonLinesEventSink::stdout()),
            EventOutput::Log => Arc::new(TracingEventSink::new()),
        }
    }
}

/// Settings read from `tally.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// World-state snapshot file
    pub state_path: PathBuf,
    /// Default tracing filter
    pub log_level: String,
    /// Event destination
    pub events: EventOutput,
    /// Contract behavior
    pub contract: ContractConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from("tally-state.json"),
            log_level: "info".to_string(),
            events: EventOutput::default(),
            contract: ContractConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: CliConfig = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config
            .contract
            .validate()
            .with_context(|| format!("Invalid contract settings in {}", path.display()))?;

        Ok(config)
    }

    /// Apply `TALLY_STATE_PATH` and `TALLY_LOG` from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(STATE_PATH_ENV).filter(|v| !v.is_empty()) {
            self.state_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_ENV).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::config::PlaceholderPolicy;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(
            &path,
            r#"
state_path = "/var/lib/tally/state.json"
events = "log"

[contract]
placeholder_policy = "reject"
"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.state_path, PathBuf::from("/var/lib/tally/state.json"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.events, EventOutput::Log);
        assert_eq!(config.contract.placeholder_policy, PlaceholderPolicy::Reject);
        assert_eq!(config.contract.allowance_namespace, "insurance");
    }

    #[test]
    fn invalid_contract_settings_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tally.toml");
        std::fs::write(&path, "[contract]\nallowance_namespace = \"\"\n").unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn log_output_sink_accepts_events() {
        let sink = EventOutput::Log.sink();
        assert!(sink.emit("transferEvent", b"{}").is_ok());
        assert!(sink.emit("", b"{}").is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = CliConfig::default();
        config.apply_overrides(|name| match name {
            STATE_PATH_ENV => Some("/tmp/other.json".to_string()),
            LOG_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.state_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(config.log_level, "info");
    }
}
