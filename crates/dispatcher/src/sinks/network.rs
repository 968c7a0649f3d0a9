//! HttpTransport - POSTs each record as JSON to the configured endpoint

use contracts::{ContractError, LogRecord, LogTransport};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configuration for HttpTransport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(5000),
            user_agent: format!("error-dispatch/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let mut config = Self::default();

        if let Some(raw) = params.get("timeout_ms") {
            let ms: u64 = raw
                .parse()
                .map_err(|e| format!("invalid timeout_ms '{}': {}", raw, e))?;
            config.timeout = Duration::from_millis(ms);
        }

        if let Some(agent) = params.get("user_agent") {
            config.user_agent = agent.clone();
        }

        Ok(config)
    }
}

/// Transport that delivers records over HTTP
pub struct HttpTransport {
    name: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HttpTransport
    pub fn new(name: impl Into<String>, config: HttpTransportConfig) -> Result<Self, ContractError> {
        let name = name.into();
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| ContractError::delivery(&name, format!("http client error: {e}")))?;

        debug!(transport = %name, timeout = ?config.timeout, "HttpTransport created");

        Ok(Self { name, client })
    }

    /// Create from params (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let config =
            HttpTransportConfig::from_params(params).map_err(|e| ContractError::delivery(&name, e))?;
        Self::new(name, config)
    }
}

impl LogTransport for HttpTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "http_transport_deliver",
        skip(self, record),
        fields(transport = %self.name, endpoint = %record.endpoint)
    )]
    async fn deliver(&mut self, record: &LogRecord) -> Result<(), ContractError> {
        let response = self
            .client
            .post(&record.endpoint)
            .header(API_KEY_HEADER, &record.api_key)
            .json(record)
            .send()
            .await
            .map_err(|e| ContractError::delivery(&self.name, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContractError::delivery(
                &self.name,
                format!("endpoint responded with {status}"),
            ));
        }

        debug!(transport = %self.name, status = status.as_u16(), "Delivered");
        Ok(())
    }

    #[instrument(name = "http_transport_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        // Every record is sent on its own request
        Ok(())
    }

    #[instrument(name = "http_transport_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        debug!(transport = %self.name, "HttpTransport closed");
        Ok(())
    }
}
