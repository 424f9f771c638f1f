//! # Ledger Configuration
//!
//! Runtime settings loaded from TOML. Every field is optional:
//!
//! ```toml
//! channel_capacity = 64
//! event_channel = "evtSender"
//! depletion_strategy = "two_phase"   # or "single_pass"
//! ```
//!
//! Log verbosity is not configured here; it follows `RUST_LOG`.

use crate::depletion::DepletionStrategy;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// Request buffer of each collection actor.
    pub channel_capacity: usize,
    /// Name of the event channel replenishment requests are published on.
    pub event_channel: String,
    pub depletion_strategy: DepletionStrategy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 32,
            event_channel: "evtSender".to_string(),
            depletion_strategy: DepletionStrategy::SinglePass,
        }
    }
}

impl LedgerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "channel_capacity must be at least 1".to_string(),
            ));
        }
        if self.event_channel.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "event_channel must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(LedgerConfig::from_toml_str("").unwrap(), LedgerConfig::default());
    }

    #[test]
    fn test_fields_override_defaults() {
        let config = LedgerConfig::from_toml_str(
            r#"
            channel_capacity = 8
            depletion_strategy = "two_phase"
            "#,
        )
        .unwrap();
        assert_eq!(config.channel_capacity, 8);
        assert_eq!(config.event_channel, "evtSender");
        assert_eq!(config.depletion_strategy, DepletionStrategy::TwoPhase);
    }

    #[test]
    fn test_zero_capacity_is_invalid() {
        assert!(matches!(
            LedgerConfig::from_toml_str("channel_capacity = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_unknown_strategy_is_a_parse_error() {
        assert!(matches!(
            LedgerConfig::from_toml_str(r#"depletion_strategy = "sometimes""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            LedgerConfig::load("/nonexistent/ledger.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
