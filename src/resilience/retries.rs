//! Retry logic.
//!
//! # Responsibilities
//! - Invoke an operation up to `max_attempts` times
//! - Wait with exponential backoff between attempts
//! - Abort promptly when the run context is cancelled or expires
//!
//! # Design Decisions
//! - Every operation error is retried; cancellation errors are not
//! - The wrapped operation and the backoff wait both race the run context
//! - Exhaustion wraps the last underlying error rather than replacing it

use std::future::Future;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::lifecycle::RunContext;
use crate::resilience::backoff::next_delay;

/// Retry policy for one call site.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total invocations allowed, first try included.
    pub max_attempts: u32,
    /// Wait after the first failure.
    pub initial_delay: Duration,
    /// Upper bound for any single wait.
    pub max_delay: Duration,
    /// Growth factor applied after each failed attempt.
    pub multiplier: f64,
}

impl RetryConfig {
    pub fn new(
        max_attempts: u32,
        initial_delay: Duration,
        max_delay: Duration,
        multiplier: f64,
    ) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay,
            multiplier,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Run `operation` until it succeeds or `config.max_attempts` is reached.
///
/// Returns `AppError::RetriesExhausted` carrying the last error when every
/// attempt fails, or the context's error as soon as `ctx` is done.
pub async fn with_retry<T, F, Fut>(
    ctx: &RunContext,
    config: &RetryConfig,
    mut operation: F,
) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut delay = config.initial_delay;
    let mut attempt = 0;

    loop {
        attempt += 1;
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        tracing::debug!(attempt, max_attempts, "Attempting operation");

        let result = tokio::select! {
            biased;
            reason = ctx.done() => return Err(reason),
            result = operation() => result,
        };

        let err = match result {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(successful_attempt = attempt, "Operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if err.is_cancellation() => return Err(err),
            Err(err) => err,
        };

        if attempt >= max_attempts {
            tracing::error!(attempts = attempt, last_error = %err, "All retry attempts exhausted");
            return Err(AppError::RetriesExhausted {
                attempts: attempt,
                source: Box::new(err),
            });
        }

        tracing::warn!(attempt, delay = ?delay, error = %err, "Operation failed, retrying");

        tokio::select! {
            biased;
            reason = ctx.done() => return Err(reason),
            _ = tokio::time::sleep(delay) => {}
        }

        delay = next_delay(delay, config.multiplier, config.max_delay);
    }
}
