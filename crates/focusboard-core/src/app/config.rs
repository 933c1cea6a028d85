//! Board configuration.
//!
//! All fields have defaults, so a partial JSON document is enough:
//!
//! ```json
//! { "storageKey": "myBoard", "persistOnTick": false }
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardConfig {
    /// Key of the snapshot slot in the key-value store.
    pub storage_key: String,

    /// Countdown cadence.
    pub tick_interval_ms: u64,

    /// Remaining seconds at or below which a running task is urgent.
    pub urgent_threshold_secs: u64,

    /// Also persist after each countdown decrement.
    pub persist_on_tick: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            storage_key: "todoAppData".to_string(),
            tick_interval_ms: 1_000,
            urgent_threshold_secs: 60,
            persist_on_tick: true,
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("storage key must not be blank")]
    BlankStorageKey,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    #[error("invalid config document: {0}")]
    Parse(String),
}

impl BoardConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::BlankStorageKey);
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_board() {
        let config = BoardConfig::default();
        assert_eq!(config.storage_key, "todoAppData");
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.urgent_threshold_secs, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = BoardConfig::from_json(r#"{ "persistOnTick": false }"#).unwrap();
        assert!(!config.persist_on_tick);
        assert_eq!(config.storage_key, "todoAppData");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_eq!(
            BoardConfig::from_json(r#"{ "storageKey": " " }"#),
            Err(ConfigError::BlankStorageKey)
        );
        assert_eq!(
            BoardConfig::from_json(r#"{ "tickIntervalMs": 0 }"#),
            Err(ConfigError::ZeroTickInterval)
        );
        assert!(matches!(
            BoardConfig::from_json("[1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }
}
