//! Records produced by the dispatcher for its sinks

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ErrorKind, ExternalLoggingConfig, IncomingError};

/// Record handed to the remote sink
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub application_name: String,
    pub endpoint: String,
    pub api_key: String,
    pub timestamp: DateTime<Utc>,
    pub error: IncomingError,
}

impl LogRecord {
    /// Build a record for the given remote settings
    pub fn new(
        application_name: impl Into<String>,
        remote: &ExternalLoggingConfig,
        error: IncomingError,
    ) -> Self {
        Self {
            application_name: application_name.into(),
            endpoint: remote.endpoint.clone(),
            api_key: remote.api_key.clone(),
            timestamp: Utc::now(),
            error,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl fmt::Debug for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogRecord")
            .field("application_name", &self.application_name)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .field("error", &self.error)
            .finish()
    }
}

/// Record handed to the local diagnostic sink
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticRecord<'a> {
    pub application_name: &'a str,
    pub kind: ErrorKind,
    pub error: &'a IncomingError,
}

impl<'a> DiagnosticRecord<'a> {
    pub fn new(application_name: &'a str, error: &'a IncomingError) -> Self {
        Self {
            application_name,
            kind: error.kind(),
            error,
        }
    }

    /// Text line, e.g. `Client Error: boom`
    pub fn line(&self) -> String {
        format!("{}: {}", self.kind.tag(), self.error.message())
    }
}
