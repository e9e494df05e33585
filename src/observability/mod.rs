//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with key/value fields
//!     → logging.rs (filter by level, format pretty or JSON, write to stderr)
//! ```
//!
//! Each run is wrapped in a span carrying a `run_id` (UUID v4) so every event
//! of one invocation can be correlated.

pub mod logging;

pub use logging::init_logging;
