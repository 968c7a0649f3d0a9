//! ConsoleSender - logs remote records locally instead of shipping them

use contracts::{ContractError, LogRecord, RecordSender};
use tracing::info;

/// Remote sender that only logs the record
///
/// Used when the host configures remote logging but no outbound transport.
#[derive(Debug, Clone)]
pub struct ConsoleSender {
    name: String,
}

impl ConsoleSender {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ConsoleSender {
    fn default() -> Self {
        Self::new("console")
    }
}

impl RecordSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, record: LogRecord) -> Result<(), ContractError> {
        info!(
            sender = %self.name,
            application = %record.application_name,
            kind = record.kind().as_str(),
            error = ?record.error,
            "Logging to external service: {}",
            record.endpoint
        );
        Ok(())
    }
}
