//! Configuration validation module.
//!
//! Collects every problem in one pass so a broken configuration file is
//! reported in full rather than one error at a time.

use crate::{AppConfig, Endpoint};
use std::fmt;
use url::Url;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// URL format is invalid.
    InvalidUrl { url_type: String, message: String },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
    /// Endpoint template does not start with `/`.
    InvalidEndpoint { name: String, template: String },
    /// Status message key is not an HTTP status code.
    InvalidStatusKey { key: String },
    /// Default header has an empty name.
    EmptyHeaderName,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl { url_type, message } => {
                write!(f, "Invalid {} URL: {}", url_type, message)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
            Self::InvalidEndpoint { name, template } => {
                write!(f, "Endpoint '{}' must start with '/', got '{}'", name, template)
            }
            Self::InvalidStatusKey { key } => {
                write!(f, "Status message key '{}' is not a status code (100-599)", key)
            }
            Self::EmptyHeaderName => write!(f, "Default header names cannot be empty"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_api(config, &mut errors);
        Self::validate_endpoints(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_api(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        let api = &config.api;

        match Url::parse(&api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "base".to_string(),
                message: format!("scheme must be http or https, got {}", url.scheme()),
            }),
            Err(e) => errors.push(ConfigValidationError::InvalidUrl {
                url_type: "base".to_string(),
                message: format!("{} ({})", e, api.base_url),
            }),
        }

        if api.timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "api.timeout_secs".to_string(),
                value: api.timeout_secs,
            });
        }

        if api.default_headers.keys().any(|name| name.trim().is_empty()) {
            errors.push(ConfigValidationError::EmptyHeaderName);
        }

        for key in api.status_messages.keys() {
            let valid = key.parse::<u16>().is_ok_and(|code| (100..=599).contains(&code));
            if !valid {
                errors.push(ConfigValidationError::InvalidStatusKey { key: key.clone() });
            }
        }
    }

    fn validate_endpoints(config: &AppConfig, errors: &mut Vec<ConfigValidationError>) {
        for endpoint in Endpoint::ALL {
            let template = config.api.endpoints.template(endpoint);
            if !template.starts_with('/') {
                errors.push(ConfigValidationError::InvalidEndpoint {
                    name: endpoint.key().to_string(),
                    template: template.to_string(),
                });
            }
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
