//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Error Dispatch - route application errors to diagnostic, default and remote sinks
#[derive(Parser, Debug)]
#[command(
    name = "error-dispatch",
    author,
    version,
    about = "Configurable error dispatch pipeline",
    long_about = "Validates error handling configuration files and dispatches errors through \n\
                  the configured sinks: the default error surface, local diagnostics and an \n\
                  optional remote logging endpoint."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ERROR_DISPATCH_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "ERROR_DISPATCH_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration file
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Dispatch one error through the configured pipeline
    Emit(EmitArgs),
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "error-dispatch.toml", env = "ERROR_DISPATCH_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "error-dispatch.toml", env = "ERROR_DISPATCH_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `emit` command
#[derive(Parser, Debug, Clone)]
pub struct EmitArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "error-dispatch.toml", env = "ERROR_DISPATCH_CONFIG")]
    pub config: PathBuf,

    /// Error message (overrides the derived transport message when --status is set)
    #[arg(short, long, required_unless_present_any = ["status", "error_json"])]
    pub message: Option<String>,

    /// Emit a transport error with this HTTP status
    #[arg(long, conflicts_with = "error_json")]
    pub status: Option<u16>,

    /// Status text of the transport error
    #[arg(long, requires = "status")]
    pub status_text: Option<String>,

    /// Request url of the transport error
    #[arg(long, requires = "status")]
    pub url: Option<String>,

    /// Raw JSON error value, classified by shape
    #[arg(long = "json", id = "error_json", conflicts_with = "message")]
    pub error_json: Option<String>,

    /// Override the remote logging API key from configuration
    #[arg(long, env = "ERROR_DISPATCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "ERROR_DISPATCH_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => Self::Json,
            LogFormat::Pretty => Self::Pretty,
            LogFormat::Compact => Self::Compact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_emit_transport_args() {
        let cli = Cli::try_parse_from([
            "error-dispatch",
            "emit",
            "--config",
            "app.toml",
            "--status",
            "404",
            "--status-text",
            "Not Found",
        ])
        .unwrap();

        match cli.command {
            Commands::Emit(args) => {
                assert_eq!(args.status, Some(404));
                assert_eq!(args.status_text.as_deref(), Some("Not Found"));
                assert!(args.message.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_emit_requires_an_error() {
        let result = Cli::try_parse_from(["error-dispatch", "emit", "--config", "app.toml"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from([
            "error-dispatch",
            "emit",
            "--json",
            "{}",
            "--status",
            "500",
        ]);
        assert!(result.is_err());
    }
}
