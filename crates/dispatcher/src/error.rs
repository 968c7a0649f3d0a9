//! Dispatcher error types

use thiserror::Error;

/// Dispatcher-specific errors
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// Structurally invalid error handling configuration
    #[error("invalid error handling configuration: {0}")]
    Configuration(#[source] contracts::ContractError),

    /// Transport creation error
    #[error("failed to create transport '{name}': {message}")]
    TransportCreation { name: String, message: String },
}

impl DispatcherError {
    /// Create a transport creation error
    pub fn transport_creation(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TransportCreation {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether construction failed because of the configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
