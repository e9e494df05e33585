//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → config file, JSON or TOML (loader.rs)
//!     → command-line flags (ConfigOverrides)
//!     → MICV_* environment variables
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, save_config, ConfigError, ConfigOverrides, LoadedConfig};
pub use schema::{AppConfig, LogFormat, ObservabilityConfig, RetrySettings};
pub use validation::ConfigWarning;
