//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber once per process
//! - Resolve the effective log level from config, `--verbose` and `RUST_LOG`
//!
//! # Design Decisions
//! - Logs go to stderr so stdout only carries the submission result
//! - JSON format for machine parsing, pretty format for terminals
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Level used when `--verbose` is passed.
pub const VERBOSE_LEVEL: &str = "debug";

/// Pick the level directive from the configured level and the verbose flag.
pub fn effective_level(configured: &str, verbose: bool) -> &str {
    if verbose {
        VERBOSE_LEVEL
    } else if configured.trim().is_empty() {
        "info"
    } else {
        configured
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber.
///
/// Calling this twice is harmless; the second registration is ignored.
pub fn init_logging(level: &str, format: LogFormat, verbose: bool) {
    let filter = build_filter(effective_level(level, verbose));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Logging already initialized");
    }
}
