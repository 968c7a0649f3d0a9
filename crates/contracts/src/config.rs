//! ErrorHandlingConfig - how errors are handled for one application instance
//!
//! Pure data plus shape validation. A config value is created once at
//! application start and only ever borrowed afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::ContractError;

/// Error handling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ErrorHandlingConfig {
    /// Owning application, shown in diagnostic output
    #[serde(alias = "applicationName")]
    #[validate(length(min = 1, message = "application_name cannot be empty"))]
    pub application_name: String,

    /// Also invoke the platform default error surface
    #[serde(
        default = "default_include_default_handling",
        alias = "includeDefaultHandling",
        alias = "includeDefaultErrorHandling"
    )]
    pub include_default_handling: bool,

    /// Remote logging settings (None = remote sink disabled)
    #[serde(default, alias = "externalLoggingConfig")]
    #[validate(nested)]
    pub external_logging: Option<ExternalLoggingConfig>,
}

fn default_include_default_handling() -> bool {
    true
}

/// Remote logging endpoint settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ExternalLoggingConfig {
    #[serde(alias = "apiKey")]
    #[validate(length(min = 1, message = "api_key cannot be empty"))]
    pub api_key: String,

    #[validate(length(min = 1, message = "endpoint cannot be empty"))]
    pub endpoint: String,
}

impl fmt::Debug for ExternalLoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalLoggingConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ExternalLoggingConfig {
    /// Create and validate remote logging settings
    ///
    /// # Errors
    /// `ConfigValidation` when the api key or endpoint is empty
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Result<Self, ContractError> {
        let config = Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        };
        config
            .validate()
            .map_err(|e| into_contract_error(&e, "external_logging"))?;
        Ok(config)
    }

    /// Both settings are present
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.endpoint.is_empty()
    }
}

impl ErrorHandlingConfig {
    /// Create and validate a configuration
    ///
    /// # Errors
    /// `ConfigValidation` when any field violates the shape rules
    pub fn new(
        application_name: impl Into<String>,
        include_default_handling: bool,
        external_logging: Option<ExternalLoggingConfig>,
    ) -> Result<Self, ContractError> {
        let config = Self {
            application_name: application_name.into(),
            include_default_handling,
            external_logging,
        };
        config.check()?;
        Ok(config)
    }

    /// Validate the shape of this configuration
    ///
    /// Returns the first violation found, fields in name order.
    pub fn check(&self) -> Result<(), ContractError> {
        self.validate().map_err(|e| into_contract_error(&e, ""))
    }

    /// Whether the remote sink is enabled
    pub fn remote_enabled(&self) -> bool {
        self.external_logging.is_some()
    }
}

fn into_contract_error(errors: &ValidationErrors, prefix: &str) -> ContractError {
    match first_violation(errors, prefix) {
        Some((field, message)) => ContractError::config_validation(field, message),
        None => ContractError::config_validation(prefix, errors.to_string()),
    }
}

fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        let found = match kind {
            ValidationErrorsKind::Field(errs) => errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (path, message)
            }),
            ValidationErrorsKind::Struct(inner) => first_violation(inner, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(idx, inner)| first_violation(inner, &format!("{path}[{idx}]"))),
        };

        if found.is_some() {
            return found;
        }
    }
    None
}
