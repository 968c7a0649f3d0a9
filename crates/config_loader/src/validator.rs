//! Config validation
//!
//! Rules:
//! - error handling settings pass their shape checks
//! - transport queue_capacity > 0
//! - file transport has a `path` param
//! - `timeout_ms`, when set, is a positive integer

use contracts::{ContractError, DispatchBlueprint, TransportConfig, TransportType};

/// Validate a DispatchBlueprint
///
/// Returns the first error found, or Ok(()).
pub fn validate(blueprint: &DispatchBlueprint) -> Result<(), ContractError> {
    validate_error_handling(blueprint)?;
    validate_transport(&blueprint.transport)?;
    Ok(())
}

/// Non-fatal issues worth reporting to an operator
pub fn collect_warnings(blueprint: &DispatchBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();
    let transport = blueprint.transport.transport_type;

    match &blueprint.error_handling.external_logging {
        Some(remote) => {
            if !remote.endpoint.starts_with("http://") && !remote.endpoint.starts_with("https://")
            {
                warnings.push(format!(
                    "external_logging.endpoint '{}' is not an http(s) url",
                    remote.endpoint
                ));
            }
            if transport == TransportType::Console {
                warnings.push(
                    "console transport configured - remote records are only logged locally"
                        .to_string(),
                );
            }
        }
        None => {
            if transport != TransportType::Console {
                warnings.push(format!(
                    "transport '{}' configured but external_logging is disabled",
                    transport.as_str()
                ));
            }
        }
    }

    warnings
}

fn validate_error_handling(blueprint: &DispatchBlueprint) -> Result<(), ContractError> {
    blueprint.error_handling.check().map_err(|e| match e {
        ContractError::ConfigValidation { field, message } => {
            ContractError::config_validation(format!("error_handling.{field}"), message)
        }
        other => other,
    })
}

fn validate_transport(transport: &TransportConfig) -> Result<(), ContractError> {
    if transport.queue_capacity == 0 {
        return Err(ContractError::config_validation(
            "transport.queue_capacity",
            "queue_capacity must be > 0",
        ));
    }

    if transport.transport_type == TransportType::File
        && transport.params.get("path").is_none_or(|p| p.is_empty())
    {
        return Err(ContractError::config_validation(
            "transport.params.path",
            "file transport requires a 'path' parameter",
        ));
    }

    if let Some(raw) = transport.params.get("timeout_ms") {
        match raw.parse::<u64>() {
            Ok(ms) if ms > 0 => {}
            _ => {
                return Err(ContractError::config_validation(
                    "transport.params.timeout_ms",
                    format!("timeout_ms must be a positive integer, got '{raw}'"),
                ));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{ErrorHandlingConfig, ExternalLoggingConfig};

    fn minimal_blueprint() -> DispatchBlueprint {
        DispatchBlueprint::new(ErrorHandlingConfig {
            application_name: "TestApp".into(),
            include_default_handling: true,
            external_logging: Some(ExternalLoggingConfig {
                api_key: "k".into(),
                endpoint: "https://logging.example.com/api".into(),
            }),
        })
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_empty_application_name() {
        let mut bp = minimal_blueprint();
        bp.error_handling.application_name = String::new();
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("error_handling.application_name"), "got: {err}");
    }

    #[test]
    fn test_missing_endpoint() {
        let mut bp = minimal_blueprint();
        if let Some(remote) = bp.error_handling.external_logging.as_mut() {
            remote.endpoint.clear();
        }
        let err = validate(&bp).unwrap_err().to_string();
        assert!(
            err.contains("error_handling.external_logging.endpoint"),
            "got: {err}"
        );
    }

    #[test]
    fn test_zero_queue_capacity() {
        let mut bp = minimal_blueprint();
        bp.transport.queue_capacity = 0;
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("queue_capacity"), "got: {err}");
    }

    #[test]
    fn test_file_transport_requires_path() {
        let mut bp = minimal_blueprint();
        bp.transport.transport_type = TransportType::File;
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("path"), "got: {err}");

        bp.transport
            .params
            .insert("path".into(), "/tmp/errors.jsonl".into());
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_invalid_timeout() {
        let mut bp = minimal_blueprint();
        bp.transport
            .params
            .insert("timeout_ms".into(), "soon".into());
        let err = validate(&bp).unwrap_err().to_string();
        assert!(err.contains("timeout_ms"), "got: {err}");
    }

    #[test]
    fn test_warnings() {
        let bp = minimal_blueprint();
        let warnings = collect_warnings(&bp);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("console transport"));

        let mut bp = minimal_blueprint();
        bp.error_handling.external_logging = None;
        bp.transport.transport_type = TransportType::Http;
        let warnings = collect_warnings(&bp);
        assert!(warnings[0].contains("external_logging is disabled"));
    }

    #[test]
    fn test_non_http_endpoint_warning() {
        let mut bp = minimal_blueprint();
        bp.transport.transport_type = TransportType::Http;
        if let Some(remote) = bp.error_handling.external_logging.as_mut() {
            remote.endpoint = "logging.example.com".into();
        }
        let warnings = collect_warnings(&bp);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not an http(s) url"));
    }
}
