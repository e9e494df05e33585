//! Run context: cancellation plus an optional umbrella deadline.

use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;

/// Cancellation handle threaded through every suspension point of a run.
///
/// Cloning shares the same token, so cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RunContext {
    /// A context that is only done when cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that also expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Cancel the run.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the context's error if it is already done.
    pub fn err(&self) -> Option<AppError> {
        if self.token.is_cancelled() {
            return Some(AppError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(AppError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is done, yielding the reason.
    pub async fn done(&self) -> AppError {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => AppError::Cancelled,
                    _ = tokio::time::sleep_until(deadline) => AppError::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                AppError::Cancelled
            }
        }
    }
}
