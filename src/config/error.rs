//! Errors raised while loading and validating settings.
//!
//! Configuration comes from layered TOML files plus `SALON_*`
//! environment variables; anything that goes wrong on that path
//! surfaces as a [`ConfigError`] before the server touches the
//! database.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base config file (or an explicitly requested one) is missing.
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// The merged sources did not deserialize into `Settings`.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A settings field failed its post-load check.
    #[error("Invalid configuration: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// Both a config directory and a single config file were requested.
    #[error("Conflicting configuration sources: {0}")]
    MutualExclusivityError(String),

    /// Anything else the config crate reports while merging sources.
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_the_field() {
        let error = ConfigError::validation("server.port", "must not be 0");
        assert_eq!(
            error.to_string(),
            "Invalid configuration: server.port - must not be 0"
        );
    }

    #[test]
    fn test_file_not_found_display() {
        let error = ConfigError::file_not_found("config/default.toml");
        assert!(error.to_string().contains("config/default.toml"));
    }
}
