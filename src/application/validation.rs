//! Payload validation.
//!
//! # Design Decisions
//! - Validation is a pure function: ApplicationPayload → Result<(), AppError>
//! - Fields are checked in wire order; the first failure is reported
//! - Email check is a deliberately weak heuristic ("@" and "."), not RFC 5322

use crate::application::types::ApplicationPayload;
use crate::error::{AppError, AppResult};

const NAME_MIN_LEN: usize = 2;
const JOB_TITLE_MIN_LEN: usize = 3;

/// Validate a payload before any network activity.
pub fn validate_payload(payload: &ApplicationPayload) -> AppResult<()> {
    required("name", &payload.name)?;
    min_length("name", &payload.name, NAME_MIN_LEN)?;

    required("email", &payload.email)?;
    email_format(&payload.email)?;

    required("job_title", &payload.job_title)?;
    min_length("job_title", &payload.job_title, JOB_TITLE_MIN_LEN)?;

    Ok(())
}

/// Names of required fields that are blank, in wire order.
pub fn missing_required_fields(payload: &ApplicationPayload) -> Vec<&'static str> {
    [
        ("name", &payload.name),
        ("email", &payload.email),
        ("job_title", &payload.job_title),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

fn required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(field, format!("{} is required", field)));
    }
    Ok(())
}

fn min_length(field: &str, value: &str, min: usize) -> AppResult<()> {
    if value.trim().chars().count() < min {
        return Err(AppError::validation(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    Ok(())
}

fn email_format(value: &str) -> AppResult<()> {
    if !value.contains('@') || !value.contains('.') {
        return Err(AppError::validation("email", "invalid email format"));
    }
    Ok(())
}
