//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// `--json` value is not valid JSON
    #[error("Invalid error payload: {message}")]
    ErrorPayload { message: String },

    /// The default error surface failed while reporting
    #[error("Default error handling failed: {0}")]
    DefaultHandling(#[source] std::io::Error),
}

impl CliError {
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    pub fn error_payload(message: impl Into<String>) -> Self {
        Self::ErrorPayload {
            message: message.into(),
        }
    }
}
