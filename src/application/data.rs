//! Loading and saving application data files.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::types::ApplicationPayload;
use crate::application::validation::missing_required_fields;

/// Errors raised while reading or writing application data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to open data file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode data file {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write data file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode application data: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("insufficient arguments provided: expected <name> <email> <job_title> [final_attempt]")]
    InsufficientArguments,
}

/// Load and check application data from a JSON file.
///
/// All blank required fields are reported at once.
pub fn load_application_data(path: &Path) -> Result<ApplicationPayload, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let payload: ApplicationPayload =
        serde_json::from_str(&content).map_err(|source| DataError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    let missing = missing_required_fields(&payload);
    if !missing.is_empty() {
        return Err(DataError::MissingFields(missing));
    }

    tracing::debug!(path = %path.display(), "Application data loaded");
    Ok(payload)
}

/// Write application data as indented JSON.
pub fn save_application_data(payload: &ApplicationPayload, path: &Path) -> Result<(), DataError> {
    let json = serde_json::to_string_pretty(payload).map_err(DataError::Encode)?;
    fs::write(path, json + "\n").map_err(|source| DataError::Write {
        path: path.to_path_buf(),
        source,
    })
}
