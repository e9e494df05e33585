//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to an endpoint:
//!     → circuit_breaker.rs (fail fast while open, count outcomes)
//!     → retries.rs (attempt up to max_attempts, wait between tries)
//!     → backoff.rs (delay *= multiplier, capped at max_delay)
//! ```
//!
//! # Design Decisions
//! - Breaker wraps retry: one breaker call is one success or failure
//! - Every wait races the run context so cancellation is prompt
//! - Policies are plain values built per call site

pub mod backoff;
pub mod circuit_breaker;
pub mod retries;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use retries::{with_retry, RetryConfig};
