//! OS signal handling.
//!
//! Ctrl-C (SIGINT) cancels the run context so in-flight HTTP calls and
//! backoff waits unwind with a cancellation error instead of being killed.

use crate::lifecycle::context::RunContext;

/// Spawn a task that cancels `ctx` on Ctrl-C.
pub fn cancel_on_ctrl_c(ctx: RunContext) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::warn!("Interrupt received, cancelling run");
                ctx.cancel();
            }
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
        }
    })
}
