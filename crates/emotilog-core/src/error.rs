//! Core error types for emotilog-core.
//!
//! Store operations are total and never return these. Errors only come out of
//! configuration loading/validation and out of parsing emotion identifiers.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Dot-path key that does not exist in the configuration
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Category override naming an identifier outside the fixed set
    #[error("Unknown emotion category '{0}' in configuration")]
    UnknownCategory(String),

    /// Two overrides for the same category
    #[error("Emotion category '{0}' is configured more than once")]
    DuplicateCategory(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Returned when a string does not name one of the fixed emotion categories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown emotion: {input}")]
pub struct ParseEmotionError {
    pub input: String,
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_name_the_offending_input() {
        let err = ConfigError::UnknownCategory("BORED".to_string());
        assert_eq!(err.to_string(), "Unknown emotion category 'BORED' in configuration");

        let err = ConfigError::InvalidValue {
            key: "display.date_format".to_string(),
            message: "bad pattern".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'display.date_format': bad pattern"
        );
    }

    #[test]
    fn toml_errors_become_parse_failures() {
        let err: ConfigError = toml::from_str::<toml::Value>("display = [").unwrap_err().into();
        assert!(matches!(err, ConfigError::ParseFailed(_)));
    }

    #[test]
    fn parse_emotion_error_shows_input() {
        let err = ParseEmotionError {
            input: "bored".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown emotion: bored");
    }
}
