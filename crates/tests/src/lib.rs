//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 错误分发场景测试（默认处理 / 本地诊断 / 远程日志）
//! - 配置文件 -> 管道 -> 传输 的 e2e 测试

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use contracts::{
        ContractError, DiagnosticRecord, DiagnosticSink, ErrorHandler, IncomingError, LogRecord,
        RecordSender,
    };

    /// Captures diagnostic lines
    #[derive(Clone, Default)]
    pub struct Diagnostics(pub Arc<Mutex<Vec<String>>>);

    impl DiagnosticSink for Diagnostics {
        fn emit(&self, record: &DiagnosticRecord<'_>) {
            self.0.lock().unwrap().push(record.line());
        }
    }

    impl Diagnostics {
        pub fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    /// Counts default surface invocations
    #[derive(Clone, Default)]
    pub struct Surface(pub Arc<Mutex<Vec<IncomingError>>>);

    impl ErrorHandler for Surface {
        type Error = std::convert::Infallible;

        fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error> {
            self.0.lock().unwrap().push(error.clone());
            Ok(())
        }
    }

    impl Surface {
        pub fn count(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    /// Captures remote records
    #[derive(Clone, Default)]
    pub struct Remote(pub Arc<Mutex<Vec<LogRecord>>>);

    impl RecordSender for Remote {
        fn name(&self) -> &str {
            "capture"
        }

        fn send(&self, record: LogRecord) -> Result<(), ContractError> {
            self.0.lock().unwrap().push(record);
            Ok(())
        }
    }

    impl Remote {
        pub fn records(&self) -> Vec<LogRecord> {
            self.0.lock().unwrap().clone()
        }
    }
}

#[cfg(test)]
mod contract_tests {
    use contracts::{ErrorHandlingConfig, IncomingError};

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_camel_case_config_accepted() {
        let config: ErrorHandlingConfig = serde_json::from_str(
            r#"{
                "applicationName": "TestApp",
                "includeDefaultErrorHandling": false,
                "externalLoggingConfig": { "apiKey": "k", "endpoint": "https://logging.example.com/api" }
            }"#,
        )
        .unwrap();

        assert!(config.check().is_ok());
        assert_eq!(config.application_name, "TestApp");
        assert!(!config.include_default_handling);
        assert_eq!(config.external_logging.unwrap().api_key, "k");
    }

    #[test]
    fn test_incoming_error_wire_shape() {
        let json = serde_json::json!({ "kind": "client", "name": "Error", "message": "boom", "causes": [] });
        let error: IncomingError = serde_json::from_value(json).unwrap();
        assert_eq!(error.message(), "boom");
    }
}

#[cfg(test)]
mod scenario_tests {
    use contracts::{ClientError, ErrorHandlingConfig, ExternalLoggingConfig, TransportError};
    use dispatcher::ErrorDispatcher;
    use std::sync::Arc;

    use crate::support::{Diagnostics, Remote, Surface};

    fn build(
        config: ErrorHandlingConfig,
    ) -> (ErrorDispatcher<Surface>, Diagnostics, Surface, Remote) {
        let diagnostics = Diagnostics::default();
        let surface = Surface::default();
        let remote = Remote::default();

        let dispatcher = ErrorDispatcher::builder(config)
            .default_surface(surface.clone())
            .diagnostics(Arc::new(diagnostics.clone()))
            .remote_sender(Arc::new(remote.clone()))
            .build()
            .unwrap();

        (dispatcher, diagnostics, surface, remote)
    }

    /// Client error with every sink enabled
    #[test]
    fn test_client_error_full_config() {
        let remote_config =
            ExternalLoggingConfig::new("k", "https://logging.example.com/api").unwrap();
        let config = ErrorHandlingConfig::new("TestApp", true, Some(remote_config)).unwrap();
        let (dispatcher, diagnostics, surface, remote) = build(config);

        dispatcher
            .handle(ClientError::new("Test client error").into())
            .unwrap();

        assert_eq!(diagnostics.lines(), vec!["Client Error: Test client error"]);
        assert_eq!(surface.count(), 1);

        let records = remote.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].api_key, "k");
        assert_eq!(records[0].endpoint, "https://logging.example.com/api");
        assert_eq!(records[0].error.message(), "Test client error");
    }

    /// Transport error without remote logging
    #[test]
    fn test_transport_error_without_remote() {
        let config = ErrorHandlingConfig::new("TestApp", true, None).unwrap();
        let (dispatcher, diagnostics, surface, remote) = build(config);

        let error = TransportError::new(404, Some("Not Found".into()), Some("/api/users".into()));
        dispatcher.handle(error.into()).unwrap();

        assert_eq!(
            diagnostics.lines(),
            vec!["HTTP Error: Http failure response for /api/users: 404 Not Found"]
        );
        assert_eq!(surface.count(), 1);
        assert!(remote.records().is_empty());
    }

    /// Default handling disabled
    #[test]
    fn test_default_handling_disabled() {
        let config = ErrorHandlingConfig::new("TestApp", false, None).unwrap();
        let (dispatcher, diagnostics, surface, remote) = build(config);

        dispatcher.handle(ClientError::new("quiet").into()).unwrap();

        assert_eq!(surface.count(), 0);
        assert_eq!(diagnostics.lines().len(), 1);
        assert!(remote.records().is_empty());
    }

    /// Every error yields exactly one diagnostic line, whatever its shape
    #[test]
    fn test_one_diagnostic_per_error() {
        let config = ErrorHandlingConfig::new("TestApp", false, None).unwrap();
        let (dispatcher, diagnostics, _, _) = build(config);

        let values = [
            serde_json::json!(null),
            serde_json::json!("text"),
            serde_json::json!({ "status": 0 }),
            serde_json::json!({ "status": 500, "url": "/x" }),
            serde_json::json!({ "message": "m" }),
        ];
        for value in &values {
            dispatcher.handle(dispatcher::classify_value(value)).unwrap();
        }

        let lines = diagnostics.lines();
        assert_eq!(lines.len(), values.len());
        assert_eq!(lines.iter().filter(|l| l.starts_with("HTTP Error")).count(), 2);
        assert_eq!(lines.iter().filter(|l| l.starts_with("Client Error")).count(), 3);
    }

    #[test]
    fn test_empty_application_name_rejected() {
        assert!(ErrorHandlingConfig::new("", true, None).is_err());
        assert!(ExternalLoggingConfig::new("k", "").is_err());
    }
}

#[cfg(test)]
mod e2e_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ClientError, LogRecord, TransportError};
    use dispatcher::{API_KEY_HEADER, create_dispatcher};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Config file -> dispatcher -> file transport
    #[tokio::test]
    async fn test_e2e_file_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("logs").join("errors.jsonl");

        let toml = format!(
            r#"
[error_handling]
application_name = "TestApp"
include_default_handling = false

[error_handling.external_logging]
api_key = "k"
endpoint = "https://logging.example.com/api"

[transport]
transport_type = "file"
queue_capacity = 16

[transport.params]
path = "{}"
"#,
            out.display()
        );
        let blueprint = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();

        let (dispatcher, transport) = create_dispatcher(&blueprint).await.unwrap();
        dispatcher
            .handle(ClientError::new("Test client error").into())
            .unwrap();
        dispatcher
            .handle(TransportError::new(404, Some("Not Found".into()), None).into())
            .unwrap();

        let snapshot = dispatcher.metrics();
        assert_eq!(snapshot.handled, 2);
        assert_eq!(snapshot.remote_handoffs, 2);

        drop(dispatcher);
        let delivery = transport.shutdown().await.unwrap();
        assert_eq!(delivery.delivered_count, 2);

        let content = std::fs::read_to_string(&out).unwrap();
        let records: Vec<LogRecord> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].application_name, "TestApp");
        assert_eq!(records[1].error.status(), Some(404));
    }

    /// Config file -> dispatcher -> HTTP transport
    #[tokio::test]
    async fn test_e2e_http_pipeline() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logs"))
            .and(header(API_KEY_HEADER, "secret"))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let json = serde_json::json!({
            "error_handling": {
                "applicationName": "TestApp",
                "includeDefaultHandling": false,
                "externalLoggingConfig": {
                    "apiKey": "secret",
                    "endpoint": format!("{}/api/logs", server.uri())
                }
            },
            "transport": { "transport_type": "http", "params": { "timeout_ms": "2000" } }
        });
        let blueprint =
            ConfigLoader::load_from_str(&json.to_string(), ConfigFormat::Json).unwrap();

        let (dispatcher, transport) = create_dispatcher(&blueprint).await.unwrap();
        dispatcher.handle(ClientError::new("boom").into()).unwrap();
        drop(dispatcher);

        let delivery = transport.shutdown().await.unwrap();
        assert_eq!(delivery.delivered_count, 1);
        assert_eq!(delivery.failure_count, 0);
    }

    /// Remote logging disabled: no transport activity at all
    #[tokio::test]
    async fn test_e2e_remote_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("errors.jsonl");

        let toml = format!(
            r#"
[error_handling]
application_name = "TestApp"
include_default_handling = false

[transport]
transport_type = "file"

[transport.params]
path = "{}"
"#,
            out.display()
        );
        let blueprint = ConfigLoader::load_from_str(&toml, ConfigFormat::Toml).unwrap();
        assert!(!config_loader::collect_warnings(&blueprint).is_empty());

        let (dispatcher, transport) = create_dispatcher(&blueprint).await.unwrap();
        dispatcher.handle(ClientError::new("local only").into()).unwrap();
        assert_eq!(dispatcher.metrics().remote_handoffs, 0);
        drop(dispatcher);

        let delivery = transport.shutdown().await.unwrap();
        assert_eq!(delivery.delivered_count, 0);
        let content = std::fs::read_to_string(&out).unwrap_or_default();
        assert!(content.is_empty());
    }

    /// A failed host HTTP call classifies as a transport error
    #[tokio::test]
    async fn test_reqwest_failure_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = reqwest::get(format!("{}/api/users", server.uri()))
            .await
            .unwrap()
            .error_for_status()
            .unwrap_err();

        let incoming = dispatcher::classify(&err);
        assert_eq!(incoming.status(), Some(503));
        assert!(incoming.message().contains("503"));
    }
}

#[cfg(test)]
mod hook_tests {
    use contracts::{ErrorHandlingConfig, IncomingError};
    use dispatcher::{ErrorDispatcher, install_panic_hook};
    use std::sync::Arc;

    use crate::support::{Diagnostics, Surface};

    #[test]
    fn test_panic_routed_through_dispatcher() {
        let diagnostics = Diagnostics::default();
        let surface = Surface::default();
        let config = ErrorHandlingConfig::new("TestApp", true, None).unwrap();

        let dispatcher = ErrorDispatcher::builder(config)
            .default_surface(surface.clone())
            .diagnostics(Arc::new(diagnostics.clone()))
            .build()
            .unwrap();
        install_panic_hook(dispatcher);

        let result = std::panic::catch_unwind(|| {
            let v: Vec<u8> = Vec::new();
            v[3]
        });
        let _ = std::panic::take_hook();

        assert!(result.is_err());
        assert_eq!(surface.count(), 1);
        let lines = diagnostics.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Client Error: index out of bounds"));

        let seen = surface.0.lock().unwrap();
        match &seen[0] {
            IncomingError::Client(c) => assert_eq!(c.name, "panic"),
            other => panic!("unexpected: {other:?}"),
        };
    }
}
