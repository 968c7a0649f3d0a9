//! TracingDiagnostics - local diagnostic sink backed by tracing

use contracts::{DiagnosticRecord, DiagnosticSink};
use tracing::error;

/// Emits one `error!` event per handled error
///
/// The line (`HTTP Error: ...` / `Client Error: ...`) is the event message,
/// the full error travels as a structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, record: &DiagnosticRecord<'_>) {
        error!(
            application = %record.application_name,
            kind = record.kind.as_str(),
            status = ?record.error.status(),
            error = ?record.error,
            "{}",
            record.line()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ClientError, IncomingError, TransportError};
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Debug, Clone, PartialEq)]
    struct Captured {
        level: Level,
        message: String,
        kind: Option<String>,
    }

    #[derive(Default)]
    struct Fields {
        message: Option<String>,
        kind: Option<String>,
    }

    impl Visit for Fields {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "kind" {
                self.kind = Some(value.to_string());
            } else {
                self.record_debug(field, &value);
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.message = Some(format!("{value:?}"));
            }
        }
    }

    /// Layer that keeps every event it sees
    #[derive(Clone, Default)]
    struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

    impl<S: Subscriber> Layer<S> for CaptureLayer {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::default();
            event.record(&mut fields);
            self.0.lock().unwrap().push(Captured {
                level: *event.metadata().level(),
                message: fields.message.unwrap_or_default(),
                kind: fields.kind,
            });
        }
    }

    #[test]
    fn test_emit_both_kinds() {
        let layer = CaptureLayer::default();
        let subscriber = tracing_subscriber::registry().with(layer.clone());

        tracing::subscriber::with_default(subscriber, || {
            let sink = TracingDiagnostics::new();

            let client: IncomingError = ClientError::new("Test client error").into();
            sink.emit(&DiagnosticRecord::new("TestApp", &client));

            let http: IncomingError =
                TransportError::new(404, Some("Not Found".into()), Some("/api/users".into())).into();
            sink.emit(&DiagnosticRecord::new("TestApp", &http));
        });

        let events = layer.0.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                Captured {
                    level: Level::ERROR,
                    message: "Client Error: Test client error".to_string(),
                    kind: Some("client".to_string()),
                },
                Captured {
                    level: Level::ERROR,
                    message: "HTTP Error: Http failure response for /api/users: 404 Not Found"
                        .to_string(),
                    kind: Some("transport".to_string()),
                },
            ]
        );
    }
}
