//! IncomingError - one observed failure handed to the dispatcher
//!
//! Exactly two shapes exist. `kind()` is a plain match, so every value
//! classifies as either a transport error or a client error.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Failed network/protocol exchange
    Transport,
    /// Any other runtime fault
    Client,
}

impl ErrorKind {
    /// Tag used in diagnostic records
    pub fn tag(self) -> &'static str {
        match self {
            Self::Transport => "HTTP Error",
            Self::Client => "Client Error",
        }
    }

    /// Short label for metrics and structured fields
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error raised by a failed network/protocol response
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransportError {
    /// Response status (0 when no response was received)
    pub status: u16,

    /// Reason phrase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// Request url
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Human readable message
    pub message: String,
}

impl TransportError {
    /// Create from a response, deriving the message
    pub fn new(status: u16, status_text: Option<String>, url: Option<String>) -> Self {
        let message = format!(
            "Http failure response for {}: {} {}",
            url.as_deref().unwrap_or("(unknown url)"),
            status,
            status_text.as_deref().unwrap_or(""),
        )
        .trim_end()
        .to_string();

        Self {
            status,
            status_text,
            url,
            message,
        }
    }

    /// Override the derived message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

/// Any runtime error that is not a transport error
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClientError {
    /// Error type name
    #[serde(default = "default_client_name")]
    pub name: String,

    /// Human readable message
    pub message: String,

    /// Captured stack or location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Messages of the underlying causes, outermost first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
}

fn default_client_name() -> String {
    "Error".to_string()
}

impl ClientError {
    /// Create a generic runtime error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: default_client_name(),
            message: message.into(),
            stack: None,
            causes: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }
}

/// A single error observed by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomingError {
    Transport(TransportError),
    Client(ClientError),
}

impl IncomingError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Transport,
            Self::Client(_) => ErrorKind::Client,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Transport(e) => &e.message,
            Self::Client(e) => &e.message,
        }
    }

    /// HTTP status, transport errors only
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => Some(e.status),
            Self::Client(_) => None,
        }
    }
}

impl fmt::Display for IncomingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for IncomingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Client(e) => Some(e),
        }
    }
}

impl From<TransportError> for IncomingError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl From<ClientError> for IncomingError {
    fn from(e: ClientError) -> Self {
        Self::Client(e)
    }
}
