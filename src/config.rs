//! Classifier configuration.

use serde::{Deserialize, Serialize};
use std::io::Read;
use thiserror::Error;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Configuration could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// Options applied to every charger model built by a classifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// When a station comes back online, return it to the last state it was
    /// known to be in instead of assuming it is available. Applies to the
    /// station and circuit-sharing machines.
    pub return_to_last_known_state: bool,
}

impl ClassifierConfig {
    pub fn with_return_to_last_known_state(mut self, enabled: bool) -> Self {
        self.return_to_last_known_state = enabled;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chargestate::config::ClassifierConfig;
    ///
    /// let config = ClassifierConfig::from_json(r#"{"return_to_last_known_state": true}"#).unwrap();
    /// assert!(config.return_to_last_known_state);
    ///
    /// let config = ClassifierConfig::from_json("{}").unwrap();
    /// assert_eq!(config, ClassifierConfig::default());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_does_not_return_to_last_known_state() {
        assert!(!ClassifierConfig::default().return_to_last_known_state);
    }

    #[test]
    fn builder_sets_flag() {
        let config = ClassifierConfig::default().with_return_to_last_known_state(true);
        assert!(config.return_to_last_known_state);
    }

    #[test]
    fn from_reader_parses_json() {
        let config =
            ClassifierConfig::from_reader(&br#"{"return_to_last_known_state": true}"#[..]).unwrap();
        assert!(config.return_to_last_known_state);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = ClassifierConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
