//! Capability traits at the dispatcher seams
//!
//! - `ErrorHandler`: anything that accepts an observed error (the dispatcher
//!   itself, the platform default surface)
//! - `DiagnosticSink`: local diagnostic output, infallible
//! - `RecordSender`: non-blocking handoff of a remote log record

use std::sync::Arc;

use crate::{ContractError, DiagnosticRecord, IncomingError, LogRecord};

/// Error handling capability
///
/// Hosts register an implementation with their own error hook.
pub trait ErrorHandler: Send + Sync {
    /// Error raised by the handler itself
    type Error: std::error::Error + Send + Sync + 'static;

    /// Handle one observed error
    fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error>;
}

impl<H: ErrorHandler + ?Sized> ErrorHandler for Arc<H> {
    type Error = H::Error;

    fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error> {
        (**self).handle_error(error)
    }
}

/// Local diagnostic output
pub trait DiagnosticSink: Send + Sync {
    /// Emit one diagnostic record
    fn emit(&self, record: &DiagnosticRecord<'_>);
}

/// Outbound handoff for remote log records
///
/// `send` must not block on I/O; delivery happens elsewhere.
pub trait RecordSender: Send + Sync {
    /// Sender name (used for logging)
    fn name(&self) -> &str;

    /// Hand a record to the outbound transport
    ///
    /// # Errors
    /// Returns handoff error (queue full, transport closed)
    fn send(&self, record: LogRecord) -> Result<(), ContractError>;
}
