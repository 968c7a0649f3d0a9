//! FileTransport - appends records to a JSON lines file

use contracts::{ContractError, LogRecord, LogTransport};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Configuration for FileTransport
#[derive(Debug, Clone)]
pub struct FileTransportConfig {
    /// Output file
    pub path: PathBuf,
}

impl FileTransportConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let path = params
            .get("path")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| "missing 'path' parameter".to_string())?;

        Ok(Self { path })
    }
}

/// Transport that writes one JSON object per line
pub struct FileTransport {
    name: String,
    config: FileTransportConfig,
    writer: Option<BufWriter<File>>,
}

impl FileTransport {
    /// Create a new FileTransport, creating parent directories
    pub fn new(name: impl Into<String>, config: FileTransportConfig) -> std::io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.path)?;

        debug!(path = %config.path.display(), "FileTransport opened");

        Ok(Self {
            name: name.into(),
            config,
            writer: Some(BufWriter::new(file)),
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, ContractError> {
        let name = name.into();
        let config = FileTransportConfig::from_params(params)
            .map_err(|e| ContractError::delivery(&name, e))?;
        Ok(Self::new(name, config)?)
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, ContractError> {
        let name = &self.name;
        self.writer
            .as_mut()
            .ok_or_else(|| ContractError::TransportClosed {
                transport: name.clone(),
            })
    }
}

impl LogTransport for FileTransport {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "file_transport_deliver",
        skip(self, record),
        fields(transport = %self.name, path = %self.config.path.display())
    )]
    async fn deliver(&mut self, record: &LogRecord) -> Result<(), ContractError> {
        let line = serde_json::to_string(record)?;
        let writer = self.writer()?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    #[instrument(name = "file_transport_flush", skip(self))]
    async fn flush(&mut self) -> Result<(), ContractError> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    #[instrument(name = "file_transport_close", skip(self))]
    async fn close(&mut self) -> Result<(), ContractError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        debug!(transport = %self.name, "FileTransport closed");
        Ok(())
    }
}
