//! `info` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use config_loader::{ConfigLoader, DispatchBlueprint};

use crate::cli::InfoArgs;
use crate::error::CliError;

const REDACTED: &str = "<redacted>";

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    error_handling: ErrorHandlingInfo,
    transport: TransportInfo,
}

#[derive(Serialize)]
struct ErrorHandlingInfo {
    application_name: String,
    include_default_handling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_logging: Option<RemoteInfo>,
}

#[derive(Serialize)]
struct RemoteInfo {
    endpoint: String,
    api_key: &'static str,
}

#[derive(Serialize)]
struct TransportInfo {
    transport_type: String,
    queue_capacity: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    params: BTreeMap<String, String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    if !args.config.exists() {
        return Err(CliError::config_not_found(args.config.display().to_string()).into());
    }

    let blueprint = ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let info = build_config_info(&blueprint);
    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&info);
    }

    Ok(())
}

fn build_config_info(blueprint: &DispatchBlueprint) -> ConfigInfo {
    let error_handling = &blueprint.error_handling;

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        error_handling: ErrorHandlingInfo {
            application_name: error_handling.application_name.clone(),
            include_default_handling: error_handling.include_default_handling,
            external_logging: error_handling.external_logging.as_ref().map(|r| RemoteInfo {
                endpoint: r.endpoint.clone(),
                api_key: REDACTED,
            }),
        },
        transport: TransportInfo {
            transport_type: blueprint.transport.transport_type.as_str().to_string(),
            queue_capacity: blueprint.transport.queue_capacity,
            params: blueprint
                .transport
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        },
    }
}

fn print_config_info(info: &ConfigInfo) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Error Dispatch Configuration                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let handling = &info.error_handling;
    println!("🧭 Error Handling");
    println!("   ├─ Version: {}", info.version);
    println!("   ├─ Application: {}", handling.application_name);
    println!("   ├─ Default handling: {}", handling.include_default_handling);
    match &handling.external_logging {
        Some(remote) => {
            println!("   └─ Remote logging: {}", remote.endpoint);
            println!("      └─ API key: {}", remote.api_key);
        }
        None => {
            println!("   └─ Remote logging: disabled");
        }
    }

    let transport = &info.transport;
    println!("\n📤 Transport ({})", transport.transport_type);
    if transport.params.is_empty() {
        println!("   └─ Queue capacity: {}", transport.queue_capacity);
    } else {
        println!("   ├─ Queue capacity: {}", transport.queue_capacity);
        for (i, (key, value)) in transport.params.iter().enumerate() {
            let is_last = i == transport.params.len() - 1;
            let prefix = if is_last { "└─" } else { "├─" };
            println!("   {} {} = {}", prefix, key, value);
        }
    }

    println!();
}
