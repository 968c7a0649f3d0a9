//! Layered error definitions
//!
//! Categorized by source: config, transport, io

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Transport Errors =====
    /// Record could not be queued, the transport queue is full
    #[error("transport '{transport}' queue full, record dropped")]
    QueueFull { transport: String },

    /// Transport worker is gone
    #[error("transport '{transport}' is closed")]
    TransportClosed { transport: String },

    /// Record serialization error
    #[error("record serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Delivery to the remote endpoint failed
    #[error("transport '{transport}' delivery error: {message}")]
    Delivery { transport: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create delivery error
    pub fn delivery(transport: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delivery {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Whether this is a configuration error raised at construction time
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigParse { .. } | Self::ConfigValidation { .. })
    }
}
