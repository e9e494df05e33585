//! Submission subsystem.
//!
//! # Data Flow
//! ```text
//! ApplicationPayload
//!     → validate (terminal on failure, no network)
//!     → secret breaker → retry → token.rs (GET secret_url, parse {"result"})
//!     → application breaker → retry → POST application_url (Authorization: <token>)
//!     → SubmissionReceipt
//! ```

pub mod orchestrator;
pub mod token;

pub use orchestrator::{SubmissionReceipt, Submitter, SubmitterSettings};
pub use token::AuthToken;
