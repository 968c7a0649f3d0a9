//! ErrorDispatcher - classifies one error and fans it out to the enabled sinks
//!
//! Order per call:
//! 1. default surface (only when `include_default_handling`)
//! 2. local diagnostic record (always)
//! 3. remote record (only when `external_logging` is configured)
//!
//! A default surface failure is returned to the caller as-is and stops the
//! remaining steps. Remote problems only ever produce warnings.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use contracts::{
    DiagnosticRecord, DiagnosticSink, DispatchBlueprint, ErrorHandler, ErrorHandlingConfig,
    IncomingError, LogRecord, RecordSender,
};

use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, DispatchSnapshot};
use crate::remote::{create_remote, RemoteTransport};
use crate::sinks::{ConsoleSender, StderrSurface, TracingDiagnostics};

/// Builder for creating an ErrorDispatcher
pub struct ErrorDispatcherBuilder<D = StderrSurface> {
    config: ErrorHandlingConfig,
    default_surface: D,
    diagnostics: Option<Arc<dyn DiagnosticSink>>,
    remote: Option<Arc<dyn RecordSender>>,
}

impl ErrorDispatcherBuilder {
    /// Create a new builder with the stderr default surface
    pub fn new(config: ErrorHandlingConfig) -> Self {
        Self {
            config,
            default_surface: StderrSurface::new(),
            diagnostics: None,
            remote: None,
        }
    }
}

impl<D: ErrorHandler> ErrorDispatcherBuilder<D> {
    /// Replace the platform default surface
    pub fn default_surface<S: ErrorHandler>(self, surface: S) -> ErrorDispatcherBuilder<S> {
        ErrorDispatcherBuilder {
            config: self.config,
            default_surface: surface,
            diagnostics: self.diagnostics,
            remote: self.remote,
        }
    }

    /// Replace the local diagnostic sink (default: tracing)
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    /// Outbound sender for remote records (default: console)
    pub fn remote_sender(mut self, sender: Arc<dyn RecordSender>) -> Self {
        self.remote = Some(sender);
        self
    }

    /// Validate the configuration and build the dispatcher
    ///
    /// # Errors
    /// `DispatcherError::Configuration` for a structurally invalid configuration
    #[instrument(
        name = "error_dispatcher_build",
        skip(self),
        fields(application = %self.config.application_name)
    )]
    pub fn build(self) -> Result<ErrorDispatcher<D>, DispatcherError> {
        self.config.check().map_err(DispatcherError::Configuration)?;

        let remote = match (&self.config.external_logging, self.remote) {
            (Some(_), Some(sender)) => Some(sender),
            (Some(_), None) => Some(Arc::new(ConsoleSender::default()) as Arc<dyn RecordSender>),
            (None, Some(sender)) => {
                debug!(
                    sender = %sender.name(),
                    "Remote sender supplied but external logging is disabled, ignoring"
                );
                None
            }
            (None, None) => None,
        };

        info!(
            application = %self.config.application_name,
            default_handling = self.config.include_default_handling,
            remote_endpoint = ?self.config.external_logging.as_ref().map(|r| r.endpoint.as_str()),
            remote_sender = ?remote.as_ref().map(|s| s.name().to_string()),
            "ErrorDispatcher initialized"
        );

        Ok(ErrorDispatcher {
            config: self.config,
            default_surface: self.default_surface,
            diagnostics: self
                .diagnostics
                .unwrap_or_else(|| Arc::new(TracingDiagnostics::new())),
            remote,
            metrics: Arc::new(DispatchMetrics::new()),
        })
    }
}

/// The error dispatch pipeline
///
/// Stateless per call; the configuration is fixed for the lifetime of the
/// instance.
pub struct ErrorDispatcher<D = StderrSurface> {
    config: ErrorHandlingConfig,
    default_surface: D,
    diagnostics: Arc<dyn DiagnosticSink>,
    remote: Option<Arc<dyn RecordSender>>,
    metrics: Arc<DispatchMetrics>,
}

impl ErrorDispatcher {
    /// Dispatcher with the default sinks
    ///
    /// # Errors
    /// `DispatcherError::Configuration` for a structurally invalid configuration
    pub fn new(config: ErrorHandlingConfig) -> Result<Self, DispatcherError> {
        ErrorDispatcherBuilder::new(config).build()
    }

    pub fn builder(config: ErrorHandlingConfig) -> ErrorDispatcherBuilder {
        ErrorDispatcherBuilder::new(config)
    }
}

impl<D: ErrorHandler> ErrorDispatcher<D> {
    /// Handle one observed error
    ///
    /// # Errors
    /// Only the default surface's own error, unmodified.
    #[instrument(
        name = "error_dispatcher_handle",
        skip(self, error),
        fields(application = %self.config.application_name, kind = error.kind().as_str())
    )]
    pub fn handle(&self, error: IncomingError) -> Result<(), D::Error> {
        let kind = error.kind();
        self.metrics.inc_handled(kind);
        observability::record_error_dispatched(&self.config.application_name, kind);

        if self.config.include_default_handling {
            self.delegate_to_default(&error)?;
        }

        self.report_locally(&error);

        if self.config.external_logging.is_some() {
            self.log_to_external_service(error);
        }

        Ok(())
    }

    pub fn config(&self) -> &ErrorHandlingConfig {
        &self.config
    }

    /// Current counters
    pub fn metrics(&self) -> DispatchSnapshot {
        self.metrics.snapshot()
    }

    fn delegate_to_default(&self, error: &IncomingError) -> Result<(), D::Error> {
        self.metrics.inc_default_invocations();
        let result = self.default_surface.handle_error(error);
        observability::record_default_handling(result.is_ok());
        if result.is_err() {
            self.metrics.inc_default_failures();
        }
        result
    }

    fn report_locally(&self, error: &IncomingError) {
        let record = DiagnosticRecord::new(&self.config.application_name, error);
        self.diagnostics.emit(&record);
    }

    fn log_to_external_service(&self, error: IncomingError) {
        let remote = self
            .config
            .external_logging
            .as_ref()
            .filter(|r| r.is_complete());

        let (Some(remote), Some(sender)) = (remote, self.remote.as_ref()) else {
            self.metrics.inc_remote_skipped();
            observability::record_remote_skipped("incomplete_config");
            warn!(
                application = %self.config.application_name,
                "external logging configuration is missing"
            );
            return;
        };

        let record = LogRecord::new(&self.config.application_name, remote, error);
        match sender.send(record) {
            Ok(()) => {
                self.metrics.inc_remote_handoffs();
                observability::record_remote_handoff(sender.name(), true);
                debug!(sender = %sender.name(), endpoint = %remote.endpoint, "Remote record queued");
            }
            Err(e) => {
                self.metrics.inc_remote_failures();
                observability::record_remote_handoff(sender.name(), false);
                warn!(
                    sender = %sender.name(),
                    endpoint = %remote.endpoint,
                    error = %e,
                    "Remote log handoff failed"
                );
            }
        }
    }
}

impl<D: ErrorHandler> ErrorHandler for ErrorDispatcher<D> {
    type Error = D::Error;

    fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error> {
        self.handle(error.clone())
    }
}

/// Build a dispatcher and its outbound transport from a blueprint
///
/// Must be awaited inside a tokio runtime; queued transports spawn a worker.
/// Drop the dispatcher before shutting the transport down so its queue drains.
#[instrument(
    name = "dispatcher_create",
    skip(blueprint),
    fields(application = %blueprint.error_handling.application_name)
)]
pub async fn create_dispatcher(
    blueprint: &DispatchBlueprint,
) -> Result<(ErrorDispatcher, RemoteTransport), DispatcherError> {
    let transport = create_remote(&blueprint.transport).await?;
    let dispatcher = ErrorDispatcher::builder(blueprint.error_handling.clone())
        .remote_sender(transport.sender())
        .build()?;
    Ok((dispatcher, transport))
}
