//! Application data subsystem.
//!
//! # Data Flow
//! ```text
//! --data file (data.rs) ─┐
//! positional args (sample.rs::from_args) ─┼→ ApplicationPayload (types.rs)
//! --generate-data-json (generate.rs) ─┘        → validation.rs before submission
//! ```

pub mod data;
pub mod generate;
pub mod sample;
pub mod types;
pub mod validation;

pub use data::{load_application_data, save_application_data, DataError};
pub use types::{ApplicationPayload, CandidateProfile, Experience};
pub use validation::validate_payload;
