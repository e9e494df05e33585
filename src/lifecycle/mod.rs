//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! main
//!     → context.rs (RunContext with umbrella deadline)
//!     → signals.rs (Ctrl-C cancels the context)
//!     → every backoff wait and HTTP call races against the context
//! ```
//!
//! # Design Decisions
//! - One context per invocation, cloned into every operation
//! - Cancellation surfaces as an error value, never a panic

pub mod context;
pub mod signals;

pub use context::RunContext;
