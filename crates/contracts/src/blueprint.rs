//! DispatchBlueprint - Config Loader output
//!
//! Host configuration file: error handling settings plus the outbound
//! transport used by the remote sink.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ErrorHandlingConfig;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete host configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Error handling settings
    pub error_handling: ErrorHandlingConfig,

    /// Outbound transport for the remote sink
    #[serde(default)]
    pub transport: TransportConfig,
}

/// Transport configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Transport type
    #[serde(default)]
    pub transport_type: TransportType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            transport_type: TransportType::default(),
            queue_capacity: default_queue_capacity(),
            params: HashMap::new(),
        }
    }
}

fn default_queue_capacity() -> usize {
    100
}

/// Transport type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportType {
    /// Log the record locally, no network activity
    #[default]
    Console,
    /// HTTP POST to the configured endpoint
    Http,
    /// Append JSON lines to a file
    File,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Console => "console",
            Self::Http => "http",
            Self::File => "file",
        }
    }
}

impl DispatchBlueprint {
    /// Blueprint with the console transport
    pub fn new(error_handling: ErrorHandlingConfig) -> Self {
        Self {
            version: ConfigVersion::V1,
            error_handling,
            transport: TransportConfig::default(),
        }
    }
}
