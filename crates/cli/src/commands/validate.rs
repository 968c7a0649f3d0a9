//! `validate` command implementation.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use config_loader::{ConfigLoader, DispatchBlueprint};

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    application_name: String,
    default_handling: bool,
    remote_logging: bool,
    transport: String,
}

impl From<&DispatchBlueprint> for ConfigSummary {
    fn from(blueprint: &DispatchBlueprint) -> Self {
        Self {
            version: format!("{:?}", blueprint.version),
            application_name: blueprint.error_handling.application_name.clone(),
            default_handling: blueprint.error_handling.include_default_handling,
            remote_logging: blueprint.error_handling.remote_enabled(),
            transport: blueprint.transport.transport_type.as_str().to_string(),
        }
    }
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    if !args.config.exists() {
        return ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("File not found: {}", args.config.display())),
            warnings: None,
            summary: None,
        };
    }

    match ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => {
            let warnings = config_loader::collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary::from(&blueprint)),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Application: {}", summary.application_name);
            println!("  Default handling: {}", summary.default_handling);
            println!("  Remote logging: {}", summary.remote_logging);
            println!("  Transport: {}", summary.transport);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_reports_warnings() {
        let file = config_file(
            r#"
[error_handling]
application_name = "TestApp"

[error_handling.external_logging]
api_key = "k"
endpoint = "logging.example.com/api"
"#,
        );
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: true,
        };

        let result = validate_config(&args);
        assert!(result.valid);
        assert!(result.warnings.unwrap().len() >= 2);
        assert!(result.summary.unwrap().remote_logging);
    }

    #[test]
    fn test_validate_rejects_empty_application() {
        let file = config_file("[error_handling]\napplication_name = \"\"\n");
        let args = ValidateArgs {
            config: file.path().to_path_buf(),
            json: false,
        };

        let result = validate_config(&args);
        assert!(!result.valid);
        assert!(result.error.unwrap().contains("application_name"));
    }

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            config: "does/not/exist.toml".into(),
            json: false,
        };
        assert!(run_validate(&args).is_err());
    }
}
