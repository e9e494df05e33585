//! Circuit breaker for endpoint protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: endpoint assumed down, calls fail fast
//! - Half-Open: cooldown elapsed, next call is a trial
//!
//! # State Transitions
//! ```text
//! Closed → Open: failure_count >= max_failures
//! Open → Half-Open: elapsed since last failure > reset_timeout (checked on next call)
//! Half-Open → Closed: trial call succeeds
//! Half-Open → Open: trial call fails (count is still at or above threshold)
//! ```
//!
//! # Design Decisions
//! - One breaker per endpoint (not global)
//! - Fail fast in Open state, the operation is never invoked
//! - The breaker does not retry; wrapping a retry loop counts as one outcome
//! - State lives behind a mutex that is never held across an await

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

use crate::error::{AppError, AppResult};
use crate::lifecycle::RunContext;

/// Circuit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

/// Thresholds for a single breaker.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit.
    pub max_failures: u32,
    /// Cooldown before an open circuit lets a trial call through.
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            reset_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug)]
struct BreakerState {
    failure_count: u32,
    last_failure_time: Option<Instant>,
    state: CircuitState,
}

/// A named circuit breaker guarding one endpoint.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerState>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerState {
                failure_count: 0,
                last_failure_time: None,
                state: CircuitState::Closed,
            }),
        }
    }

    pub fn state(&self) -> CircuitState {
        self.lock().state
    }

    pub fn failure_count(&self) -> u32 {
        self.lock().failure_count
    }

    /// Execute `operation` under circuit breaker protection.
    ///
    /// The operation's own error is returned unchanged; an open circuit
    /// yields `AppError::CircuitOpen` without invoking it.
    pub async fn call<T, F, Fut>(&self, ctx: &RunContext, operation: F) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        self.admit()?;

        match operation().await {
            Ok(value) => {
                self.on_success();
                Ok(value)
            }
            Err(err) => {
                self.on_failure();
                Err(err)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, BreakerState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn admit(&self) -> AppResult<()> {
        let mut inner = self.lock();
        if inner.state != CircuitState::Open {
            return Ok(());
        }

        let cooled_down = inner
            .last_failure_time
            .map_or(true, |at| at.elapsed() > self.config.reset_timeout);

        if cooled_down {
            inner.state = CircuitState::HalfOpen;
            tracing::info!(
                breaker = %self.name,
                "Circuit breaker transitioning to half-open state"
            );
            Ok(())
        } else {
            tracing::warn!(breaker = %self.name, "Circuit breaker is open, rejecting call");
            Err(AppError::CircuitOpen {
                breaker: self.name.clone(),
            })
        }
    }

    fn on_success(&self) {
        let mut inner = self.lock();
        if inner.state != CircuitState::Closed {
            tracing::info!(breaker = %self.name, "Circuit breaker closed after successful call");
        }
        inner.failure_count = 0;
        inner.state = CircuitState::Closed;
    }

    fn on_failure(&self) {
        let mut inner = self.lock();
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure_time = Some(Instant::now());

        if inner.failure_count >= self.config.max_failures {
            inner.state = CircuitState::Open;
            tracing::error!(
                breaker = %self.name,
                failures = inner.failure_count,
                max_failures = self.config.max_failures,
                "Circuit breaker opened due to failures"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn breaker(max_failures: u32) -> CircuitBreaker {
        CircuitBreaker::new(
            "test",
            CircuitBreakerConfig {
                max_failures,
                reset_timeout: Duration::from_secs(30),
            },
        )
    }

    async fn fail(cb: &CircuitBreaker, calls: &AtomicU32) -> AppResult<()> {
        cb.call(&RunContext::new(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::network("http://backend", "down"))
        })
        .await
    }

    async fn succeed(cb: &CircuitBreaker, calls: &AtomicU32) -> AppResult<()> {
        cb.call(&RunContext::new(), move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await
    }

    #[tokio::test]
    async fn test_opens_after_max_failures_and_rejects() {
        let cb = breaker(3);
        let calls = AtomicU32::new(0);

        for _ in 0..3 {
            let err = fail(&cb, &calls).await.unwrap_err();
            assert!(matches!(err, AppError::Network { .. }), "operation error must pass through");
        }
        assert_eq!(cb.state(), CircuitState::Open);
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let err = succeed(&cb, &calls).await.unwrap_err();
        assert!(matches!(err, AppError::CircuitOpen { ref breaker } if breaker == "test"));
        assert_eq!(calls.load(Ordering::SeqCst), 3, "open circuit must not invoke the operation");
    }

    #[tokio::test]
    async fn test_success_resets_failure_count() {
        let cb = breaker(3);
        let calls = AtomicU32::new(0);

        let _ = fail(&cb, &calls).await;
        let _ = fail(&cb, &calls).await;
        assert_eq!(cb.failure_count(), 2);

        succeed(&cb, &calls).await.unwrap();
        assert_eq!(cb.failure_count(), 0);

        let _ = fail(&cb, &calls).await;
        let _ = fail(&cb, &calls).await;
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_trial_success_closes() {
        let cb = breaker(2);
        let calls = AtomicU32::new(0);
        let _ = fail(&cb, &calls).await;
        let _ = fail(&cb, &calls).await;
        assert_eq!(cb.state(), CircuitState::Open);

        tokio::time::advance(Duration::from_secs(31)).await;

        succeed(&cb, &calls).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failure_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_trial_failure_reopens() {
        let cb = breaker(2);
        let calls = AtomicU32::new(0);
        let _ = fail(&cb, &calls).await;
        let _ = fail(&cb, &calls).await;

        tokio::time::advance(Duration::from_secs(31)).await;

        let err = fail(&cb, &calls).await.unwrap_err();
        assert!(matches!(err, AppError::Network { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cb.state(), CircuitState::Open);

        let err = succeed(&cb, &calls).await.unwrap_err();
        assert!(matches!(err, AppError::CircuitOpen { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stays_open_until_reset_timeout_elapses() {
        let cb = breaker(1);
        let calls = AtomicU32::new(0);
        let _ = fail(&cb, &calls).await;

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(matches!(succeed(&cb, &calls).await, Err(AppError::CircuitOpen { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_done_context_is_not_counted() {
        let cb = breaker(1);
        let ctx = RunContext::new();
        ctx.cancel();

        let result: AppResult<()> = cb.call(&ctx, || async { Ok(()) }).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(cb.failure_count(), 0);
        assert_eq!(cb.state(), CircuitState::Closed);
    }
}
