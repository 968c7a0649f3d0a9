//! `emit` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use config_loader::ConfigLoader;
use contracts::{ClientError, IncomingError, TransportError};
use dispatcher::{DispatchSnapshot, TransportSnapshot, classify_value, create_dispatcher};

use crate::cli::EmitArgs;
use crate::error::CliError;

/// Emit outcome for output
#[derive(Serialize)]
struct EmitReport {
    application_name: String,
    kind: &'static str,
    message: String,
    transport: String,
    dispatch: DispatchReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<DeliveryReport>,
}

#[derive(Serialize)]
struct DispatchReport {
    default_invocations: u64,
    remote_handoffs: u64,
    remote_failures: u64,
    remote_skipped: u64,
}

impl From<DispatchSnapshot> for DispatchReport {
    fn from(s: DispatchSnapshot) -> Self {
        Self {
            default_invocations: s.default_invocations,
            remote_handoffs: s.remote_handoffs,
            remote_failures: s.remote_failures,
            remote_skipped: s.remote_skipped,
        }
    }
}

#[derive(Serialize)]
struct DeliveryReport {
    delivered: u64,
    failed: u64,
    dropped: u64,
}

impl From<TransportSnapshot> for DeliveryReport {
    fn from(s: TransportSnapshot) -> Self {
        Self {
            delivered: s.delivered_count,
            failed: s.failure_count,
            dropped: s.dropped_count,
        }
    }
}

/// Execute the `emit` command
pub async fn run_emit(args: &EmitArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let mut blueprint = ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref api_key) = args.api_key {
        match blueprint.error_handling.external_logging.as_mut() {
            Some(remote) => {
                info!("Overriding remote logging API key from CLI");
                remote.api_key = api_key.clone();
            }
            None => warn!("--api-key ignored, external logging is disabled"),
        }
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    let error = build_error(args)?;

    let (dispatcher, transport) = create_dispatcher(&blueprint)
        .await
        .context("Failed to build error dispatcher")?;
    let transport_name = transport.name().to_string();

    let outcome = dispatcher.handle(error.clone());
    let dispatch = dispatcher.metrics();

    // Release the dispatcher's sender so the worker can drain
    drop(dispatcher);
    let delivery = transport.shutdown().await;

    outcome.map_err(CliError::DefaultHandling)?;

    let report = EmitReport {
        application_name: blueprint.error_handling.application_name.clone(),
        kind: error.kind().as_str(),
        message: error.message().to_string(),
        transport: transport_name,
        dispatch: dispatch.into(),
        delivery: delivery.map(Into::into),
    };
    print_report(&report)
}

/// Build the error to dispatch from CLI arguments
fn build_error(args: &EmitArgs) -> Result<IncomingError, CliError> {
    if let Some(ref raw) = args.error_json {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| CliError::error_payload(e.to_string()))?;
        return Ok(classify_value(&value));
    }

    if let Some(status) = args.status {
        let error = TransportError::new(status, args.status_text.clone(), args.url.clone());
        let error = match args.message {
            Some(ref message) => error.with_message(message.clone()),
            None => error,
        };
        return Ok(error.into());
    }

    let message = args.message.clone().unwrap_or_default();
    Ok(ClientError::new(message).into())
}

fn print_report(report: &EmitReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize emit report")?;
    println!("{}", json);
    Ok(())
}
