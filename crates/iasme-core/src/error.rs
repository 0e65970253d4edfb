//! Core error types for the research pipeline.
//!
//! Configuration errors are fatal and abort a run before any scraping starts.
//! Validation errors are raised per record and are never fatal to a run.

use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config or rename map
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Rename map file is not a flat JSON object of strings
    #[error("invalid rename map at {path}: {reason}")]
    RenameMap {
        /// Path to the map file
        path: String,
        /// Reason for rejection
        reason: String,
    },
}

/// Reasons a company record is rejected by the output schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty
    #[error("field {field} must not be empty")]
    EmptyField {
        /// Field name
        field: &'static str,
    },

    /// A URL-typed field does not hold an absolute http(s) URL
    #[error("field {field} is not a valid URL: {value}")]
    InvalidUrl {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// An email-typed field does not hold an email address
    #[error("field {field} is not a valid email: {value}")]
    InvalidEmail {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// `domain` and `website` disagree on presence
    #[error("domain must be present exactly when website is present")]
    DomainMismatch,
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::InvalidValue {
            field: "concurrency".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for concurrency: must be at least 1"
        );

        let err = ValidationError::EmptyField { field: "sources" };
        assert_eq!(err.to_string(), "field sources must not be empty");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let config_err: ConfigError = io_err.into();
        assert!(matches!(config_err, ConfigError::Io(_)));
    }
}
