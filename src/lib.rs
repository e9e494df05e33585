//! micv: submit a job application to a token-protected HTTP endpoint.
//!
//! The flow is a token fetch followed by an authenticated JSON POST, each
//! wrapped in a per-endpoint circuit breaker around an exponential-backoff
//! retry loop, all bounded by one cancellable run deadline.

// Core subsystems
pub mod application;
pub mod config;
pub mod http;
pub mod submission;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub mod build_info;
pub mod cli;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use submission::{SubmissionReceipt, Submitter, SubmitterSettings};
