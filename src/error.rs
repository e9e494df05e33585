//! Error types shared by the resilience layer and the submission flow.

use std::error::Error as _;
use thiserror::Error;

use crate::application::data::DataError;
use crate::config::loader::ConfigError;

/// Errors that can occur while submitting an application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation. Never retried.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// Transport-level failure talking to an endpoint.
    #[error("Network request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Token could not be fetched or parsed.
    #[error("Authentication against {endpoint} failed: {message}")]
    Auth { endpoint: String, message: String },

    /// Call rejected without being attempted.
    #[error("Circuit breaker '{breaker}' is open, service unavailable")]
    CircuitOpen { breaker: String },

    /// The run deadline passed.
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// The run was cancelled (e.g. Ctrl-C).
    #[error("Operation cancelled")]
    Cancelled,

    /// Every retry attempt failed.
    #[error("Operation failed after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<AppError>,
    },

    /// Submission endpoint answered with a non-success status.
    #[error("Submission to {url} rejected with status {status}")]
    Rejected { url: String, status: u16 },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result type for submission operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn auth(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Stable error code for user-facing reports.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Network { .. } => "NETWORK_ERROR",
            AppError::Auth { .. } => "AUTH_ERROR",
            AppError::CircuitOpen { .. } | AppError::DeadlineExceeded | AppError::Cancelled => {
                "TIMEOUT_ERROR"
            }
            AppError::RetriesExhausted { .. } => "UNEXPECTED_ERROR",
            AppError::Rejected { .. } => "APPLICATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Data(_) => "PARSING_ERROR",
        }
    }

    /// True for errors raised by the run context rather than an operation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, AppError::DeadlineExceeded | AppError::Cancelled)
    }

    /// Key/value diagnostics printed alongside the error message.
    pub fn context(&self) -> Vec<(&'static str, String)> {
        match self {
            AppError::Validation { field, .. } => vec![
                ("field", field.clone()),
                ("user_action_required", "true".to_string()),
            ],
            AppError::Network { url, .. } => vec![
                ("url", url.clone()),
                ("retry_suggested", "true".to_string()),
            ],
            AppError::Auth { endpoint, .. } => vec![
                ("endpoint", endpoint.clone()),
                ("check_credentials", "true".to_string()),
            ],
            AppError::CircuitOpen { breaker } => vec![("breaker", breaker.clone())],
            AppError::RetriesExhausted { attempts, source } => {
                let mut pairs = vec![("attempts", attempts.to_string())];
                pairs.extend(source.context());
                pairs
            }
            AppError::Rejected { url, status } => {
                vec![("url", url.clone()), ("status", status.to_string())]
            }
            AppError::Config(_) => vec![("check_config_file", "true".to_string())],
            AppError::DeadlineExceeded | AppError::Cancelled | AppError::Data(_) => Vec::new(),
        }
    }

    /// Lines of the user-facing failure report: headline, cause chain, context.
    pub fn report(&self) -> Vec<String> {
        let mut lines = vec![format!("Error [{}]: {}", self.code(), self)];

        let mut source = self.source();
        while let Some(cause) = source {
            lines.push(format!("  caused by: {}", cause));
            source = cause.source();
        }

        lines.extend(
            self.context()
                .into_iter()
                .map(|(key, value)| format!("  {}: {}", key, value)),
        );
        lines
    }
}
