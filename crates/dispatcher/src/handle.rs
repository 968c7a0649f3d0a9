//! TransportHandle - runs a transport behind an isolated queue and worker task
//!
//! The dispatching thread only ever does a `try_send`; delivery I/O happens
//! on the worker.

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument, warn};

use contracts::{ContractError, LogRecord, LogTransport, RecordSender};

use crate::metrics::TransportMetrics;

/// Handle to a running transport worker
pub struct TransportHandle {
    /// Producer side, shared with every `QueueSender`
    sender: QueueSender,
    /// Worker task handle
    worker_handle: JoinHandle<()>,
}

/// Cloneable, non-blocking producer for a transport queue
#[derive(Clone)]
pub struct QueueSender {
    name: String,
    tx: mpsc::Sender<LogRecord>,
    metrics: Arc<TransportMetrics>,
}

impl TransportHandle {
    /// Create a new TransportHandle and spawn the worker task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<T: LogTransport + Send + 'static>(transport: T, queue_capacity: usize) -> Self {
        let name = transport.name().to_string();
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let metrics = Arc::new(TransportMetrics::new());

        let worker_metrics = Arc::clone(&metrics);
        let worker_name = name.clone();

        let worker_handle = tokio::spawn(async move {
            transport_worker(transport, rx, worker_metrics, worker_name).await;
        });

        Self {
            sender: QueueSender { name, tx, metrics },
            worker_handle,
        }
    }

    /// Get transport name
    pub fn name(&self) -> &str {
        &self.sender.name
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<TransportMetrics> {
        &self.sender.metrics
    }

    /// Producer to hand to a dispatcher
    pub fn sender(&self) -> QueueSender {
        self.sender.clone()
    }

    /// Queue a record (non-blocking)
    pub fn try_send(&self, record: LogRecord) -> Result<(), ContractError> {
        self.sender.try_send(record)
    }

    /// Shutdown the transport worker gracefully
    ///
    /// The worker drains its queue once every `QueueSender` clone is dropped.
    #[instrument(name = "transport_handle_shutdown", skip(self), fields(transport = %self.sender.name))]
    pub async fn shutdown(self) {
        let name = self.sender.name.clone();
        // Drop sender to signal worker to stop
        drop(self.sender);
        // Wait for worker to finish
        if let Err(e) = self.worker_handle.await {
            error!(transport = %name, error = ?e, "Worker task panicked");
        }
        debug!(transport = %name, "TransportHandle shutdown complete");
    }
}

impl QueueSender {
    /// Queue a record (non-blocking)
    ///
    /// A full queue drops the record and reports `QueueFull`.
    pub fn try_send(&self, record: LogRecord) -> Result<(), ContractError> {
        match self.tx.try_send(record) {
            Ok(()) => {
                self.metrics
                    .set_queue_len(self.tx.max_capacity() - self.tx.capacity());
                Ok(())
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.metrics.inc_dropped_count();
                observability::record_record_dropped(&self.name);
                warn!(transport = %self.name, "Queue full, record dropped");
                Err(ContractError::QueueFull {
                    transport: self.name.clone(),
                })
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(transport = %self.name, "Transport worker closed unexpectedly");
                Err(ContractError::TransportClosed {
                    transport: self.name.clone(),
                })
            }
        }
    }

    pub fn metrics(&self) -> &Arc<TransportMetrics> {
        &self.metrics
    }
}

impl RecordSender for QueueSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, record: LogRecord) -> Result<(), ContractError> {
        self.try_send(record)
    }
}

/// Worker task that consumes records and delivers them
#[instrument(
    name = "transport_worker_loop",
    skip(transport, rx, metrics),
    fields(transport = %name)
)]
async fn transport_worker<T: LogTransport>(
    mut transport: T,
    mut rx: mpsc::Receiver<LogRecord>,
    metrics: Arc<TransportMetrics>,
    name: String,
) {
    debug!(transport = %name, "Transport worker started");

    while let Some(record) = rx.recv().await {
        metrics.set_queue_len(rx.len());

        let started = Instant::now();
        match transport.deliver(&record).await {
            Ok(()) => {
                metrics.inc_delivered_count();
                observability::record_record_delivered(&name, true);
                observability::record_delivery_latency_ms(
                    &name,
                    started.elapsed().as_secs_f64() * 1000.0,
                );
            }
            Err(e) => {
                metrics.inc_failure_count();
                observability::record_record_delivered(&name, false);
                error!(
                    transport = %name,
                    endpoint = %record.endpoint,
                    error = %e,
                    "Delivery failed"
                );
                // Continue processing - don't crash on single failure
            }
        }
    }

    // Cleanup
    if let Err(e) = transport.flush().await {
        error!(transport = %name, error = %e, "Flush failed on shutdown");
    }
    if let Err(e) = transport.close().await {
        error!(transport = %name, error = %e, "Close failed on shutdown");
    }

    debug!(transport = %name, "Transport worker stopped");
}
