//! Outbound transport selection for the remote sink

use std::sync::Arc;

use tracing::info;

use contracts::{RecordSender, TransportConfig, TransportType};

use crate::error::DispatcherError;
use crate::handle::TransportHandle;
use crate::metrics::TransportSnapshot;
use crate::sinks::{ConsoleSender, FileTransport, HttpTransport};

/// Remote transport built from a blueprint
pub enum RemoteTransport {
    /// Inline sender, nothing to drain
    Console(Arc<ConsoleSender>),
    /// Queue plus worker task
    Queued(TransportHandle),
}

impl RemoteTransport {
    /// Sender to hand to a dispatcher
    pub fn sender(&self) -> Arc<dyn RecordSender> {
        match self {
            Self::Console(console) => console.clone() as Arc<dyn RecordSender>,
            Self::Queued(handle) => Arc::new(handle.sender()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Console(console) => console.name(),
            Self::Queued(handle) => handle.name(),
        }
    }

    /// Worker counters; `None` for the console sender
    pub fn metrics(&self) -> Option<TransportSnapshot> {
        match self {
            Self::Console(_) => None,
            Self::Queued(handle) => Some(handle.metrics().snapshot()),
        }
    }

    /// Drain and stop the worker, returning its final counters
    ///
    /// Waits until every sender handed out by `sender()` has been dropped.
    pub async fn shutdown(self) -> Option<TransportSnapshot> {
        match self {
            Self::Console(_) => None,
            Self::Queued(handle) => {
                let metrics = Arc::clone(handle.metrics());
                handle.shutdown().await;
                Some(metrics.snapshot())
            }
        }
    }
}

/// Build the transport named by a transport config
///
/// Must be called from within a tokio runtime.
pub async fn create_remote(config: &TransportConfig) -> Result<RemoteTransport, DispatcherError> {
    let name = config.transport_type.as_str();

    let remote = match config.transport_type {
        TransportType::Console => RemoteTransport::Console(Arc::new(ConsoleSender::new(name))),
        TransportType::File => {
            let transport = FileTransport::from_params(name, &config.params)
                .map_err(|e| DispatcherError::transport_creation(name, e.to_string()))?;
            RemoteTransport::Queued(TransportHandle::spawn(transport, config.queue_capacity))
        }
        TransportType::Http => {
            let transport = HttpTransport::from_params(name, &config.params)
                .map_err(|e| DispatcherError::transport_creation(name, e.to_string()))?;
            RemoteTransport::Queued(TransportHandle::spawn(transport, config.queue_capacity))
        }
    };

    info!(
        transport = name,
        queue_capacity = config.queue_capacity,
        "Remote transport created"
    );

    Ok(remote)
}
