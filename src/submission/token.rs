//! Token retrieval from the secret endpoint.

use serde::Deserialize;
use std::fmt;

use crate::error::{AppError, AppResult};
use crate::http::{HttpResponse, HttpTransport};

/// Opaque authorization token. Never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Deserialize)]
struct SecretResponse {
    #[serde(default)]
    result: String,
}

/// Single attempt: GET the secret endpoint and extract the token.
pub async fn fetch_token(transport: &dyn HttpTransport, secret_url: &str) -> AppResult<AuthToken> {
    tracing::debug!(endpoint = %secret_url, "Fetching authentication token");

    let response = transport
        .get(secret_url)
        .await
        .map_err(|e| AppError::auth(secret_url, e.to_string()))?;

    tracing::info!(status = response.status, "Secret endpoint responded");
    parse_token(secret_url, &response)
}

/// Check the status and parse `{"result": "<token>"}`.
pub fn parse_token(secret_url: &str, response: &HttpResponse) -> AppResult<AuthToken> {
    if !response.is_success() {
        return Err(AppError::auth(
            secret_url,
            format!("secret endpoint returned non-success status: {}", response.status),
        ));
    }

    let parsed: SecretResponse = serde_json::from_slice(&response.body)
        .map_err(|e| AppError::auth(secret_url, format!("failed to parse JSON response: {}", e)))?;

    if parsed.result.is_empty() {
        return Err(AppError::auth(secret_url, "empty result in secret response"));
    }

    Ok(AuthToken(parsed.result))
}
