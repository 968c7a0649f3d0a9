//! LogTransport trait - remote delivery interface
//!
//! Runs on a worker task behind a queue, never on the dispatching thread.

use crate::{ContractError, LogRecord};

/// Remote delivery trait
///
/// All outbound transports must implement this trait.
#[trait_variant::make(LogTransport: Send)]
pub trait LocalLogTransport {
    /// Transport name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Deliver one record
    ///
    /// # Errors
    /// Returns delivery error (should include context)
    async fn deliver(&mut self, record: &LogRecord) -> Result<(), ContractError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ContractError>;

    /// Close transport
    async fn close(&mut self) -> Result<(), ContractError>;
}
