//! # Contracts
//!
//! Frozen interface contracts shared by every crate in the workspace:
//! the error handling configuration, the error and record shapes, and the
//! traits at the dispatcher seams.
//! Business crates only depend on this crate, reverse dependencies are prohibited.

mod blueprint;
mod config;
mod error;
mod handler;
mod incoming;
mod record;
mod transport;

pub use blueprint::*;
pub use config::{ErrorHandlingConfig, ExternalLoggingConfig};
pub use error::*;
pub use handler::{DiagnosticSink, ErrorHandler, RecordSender};
pub use incoming::{ClientError, ErrorKind, IncomingError, TransportError};
pub use record::{DiagnosticRecord, LogRecord};
pub use transport::{LocalLogTransport, LogTransport};
