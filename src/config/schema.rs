//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files
//! (JSON or TOML). Every field has a default so a partial file is enough.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::resilience::{CircuitBreakerConfig, RetryConfig};

pub const DEFAULT_SECRET_URL: &str = "https://au.mitimes.com/careers/apply/secret";
pub const DEFAULT_APPLICATION_URL: &str = "https://au.mitimes.com/careers/apply";

/// Root configuration for the submitter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Endpoint returning `{"result": "<token>"}`.
    pub secret_url: String,

    /// Endpoint receiving the application POST.
    pub application_url: String,

    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,

    /// Extra seconds added to `timeout_seconds` for the whole run's deadline.
    pub deadline_headroom_secs: u64,

    /// Retry policy applied to both endpoints.
    pub retry: RetrySettings,

    /// Breaker thresholds applied to each endpoint's breaker.
    pub circuit_breaker: CircuitBreakerSettings,

    pub submission: SubmissionSettings,

    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            secret_url: DEFAULT_SECRET_URL.to_string(),
            application_url: DEFAULT_APPLICATION_URL.to_string(),
            timeout_seconds: 30,
            deadline_headroom_secs: 10,
            retry: RetrySettings::default(),
            circuit_breaker: CircuitBreakerSettings::default(),
            submission: SubmissionSettings::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Umbrella deadline for one invocation.
    pub fn run_deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.saturating_add(self.deadline_headroom_secs))
    }
}

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts per call, first try included.
    pub max_attempts: u32,

    /// Delay after the first failure in milliseconds.
    pub initial_delay_ms: u64,

    /// Maximum delay between attempts in milliseconds.
    pub max_delay_ms: u64,

    /// Backoff growth factor.
    pub multiplier: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
            multiplier: 2.0,
        }
    }
}

impl RetrySettings {
    pub fn to_retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.max_delay_ms),
            self.multiplier,
        )
    }
}

/// Circuit breaker configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CircuitBreakerSettings {
    /// Consecutive failed calls before the circuit opens.
    pub max_failures: u32,

    /// Seconds an open circuit waits before allowing a trial call.
    pub reset_timeout_secs: u64,
}

impl Default for CircuitBreakerSettings {
    fn default() -> Self {
        Self {
            max_failures: 3,
            reset_timeout_secs: 30,
        }
    }
}

impl CircuitBreakerSettings {
    pub fn to_breaker_config(&self) -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            max_failures: self.max_failures,
            reset_timeout: Duration::from_secs(self.reset_timeout_secs),
        }
    }
}

/// Submission response policy.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SubmissionSettings {
    /// Treat a non-2xx submission response as an error (retried like any other).
    /// Off by default: the status is logged and reported only.
    pub fail_on_error_status: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
