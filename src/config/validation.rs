//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate endpoint URLs and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<Vec<ConfigWarning>, Vec<ValidationError>>
//! - Unusual but legal values (multiplier below 1) produce a warning, not an
//!   error; the caller emits warnings once logging is installed

use std::fmt;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A legal but suspicious configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub message: String,
}

impl ConfigWarning {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Log the warning through `tracing`.
    pub fn emit(&self) {
        tracing::warn!(field = self.field, "{}", self.message);
    }
}

/// Validate a fully merged configuration.
///
/// On success returns the warnings for values that are accepted but unusual.
pub fn validate_config(config: &AppConfig) -> Result<Vec<ConfigWarning>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_url("secret_url", &config.secret_url, &mut errors);
    check_url("application_url", &config.application_url, &mut errors);

    if config.timeout_seconds == 0 {
        errors.push(ValidationError::new("timeout_seconds", "timeout must be positive"));
    }

    let retry = &config.retry;
    if retry.max_attempts == 0 {
        errors.push(ValidationError::new("retry.max_attempts", "must be at least 1"));
    }
    if !retry.multiplier.is_finite() || retry.multiplier <= 0.0 {
        errors.push(ValidationError::new("retry.multiplier", "must be a positive number"));
    } else if retry.multiplier < 1.0 {
        warnings.push(ConfigWarning::new(
            "retry.multiplier",
            format!(
                "Retry multiplier below 1.0 ({}) shrinks the delay between attempts",
                retry.multiplier
            ),
        ));
    }
    if retry.initial_delay_ms > retry.max_delay_ms {
        errors.push(ValidationError::new(
            "retry.initial_delay_ms",
            "must not exceed retry.max_delay_ms",
        ));
    }

    if config.circuit_breaker.max_failures == 0 {
        errors.push(ValidationError::new("circuit_breaker.max_failures", "must be at least 1"));
    }

    if config.observability.log_level.parse::<tracing::Level>().is_err() {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, "URL is required"));
        return;
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL: {}", e))),
    }
}
