//! Resilient submission flow.
//!
//! # Responsibilities
//! - Validate the payload before any network activity
//! - Fetch the token, then POST the application, strictly in that order
//! - Wrap each call in its endpoint's circuit breaker around a retry loop
//!
//! # Design Decisions
//! - One breaker per endpoint so a flaky token service cannot trip submissions
//! - The token is sent verbatim in `Authorization` (no "Bearer " prefix)
//! - A non-2xx submission status is reported, not raised, unless
//!   `fail_on_error_status` is set

use std::sync::Arc;

use crate::application::{validate_payload, ApplicationPayload, DataError};
use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::http::{HttpRequest, HttpTransport, Method, CONTENT_TYPE_JSON};
use crate::lifecycle::RunContext;
use crate::resilience::{with_retry, CircuitBreaker, CircuitBreakerConfig, RetryConfig};
use crate::submission::token::{fetch_token, AuthToken};

/// Everything the submitter needs besides the transport.
#[derive(Debug, Clone)]
pub struct SubmitterSettings {
    pub secret_url: String,
    pub application_url: String,
    pub retry: RetryConfig,
    pub breaker: CircuitBreakerConfig,
    pub fail_on_error_status: bool,
}

impl SubmitterSettings {
    /// Settings with default retry and breaker policies.
    pub fn new(secret_url: impl Into<String>, application_url: impl Into<String>) -> Self {
        Self {
            secret_url: secret_url.into(),
            application_url: application_url.into(),
            retry: RetryConfig::default(),
            breaker: CircuitBreakerConfig::default(),
            fail_on_error_status: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            secret_url: config.secret_url.clone(),
            application_url: config.application_url.clone(),
            retry: config.retry.to_retry_config(),
            breaker: config.circuit_breaker.to_breaker_config(),
            fail_on_error_status: config.submission.fail_on_error_status,
        }
    }
}

/// Outcome of the submission call as reported by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: String,
}

impl SubmissionReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Orchestrates token fetch and application submission.
pub struct Submitter {
    transport: Arc<dyn HttpTransport>,
    settings: SubmitterSettings,
    token_breaker: CircuitBreaker,
    application_breaker: CircuitBreaker,
}

impl Submitter {
    pub fn new(transport: Arc<dyn HttpTransport>, settings: SubmitterSettings) -> Self {
        let token_breaker = CircuitBreaker::new("secret", settings.breaker.clone());
        let application_breaker = CircuitBreaker::new("application", settings.breaker.clone());
        Self {
            transport,
            settings,
            token_breaker,
            application_breaker,
        }
    }

    pub fn token_breaker(&self) -> &CircuitBreaker {
        &self.token_breaker
    }

    pub fn application_breaker(&self) -> &CircuitBreaker {
        &self.application_breaker
    }

    /// Validate `payload`, fetch a token and submit the application.
    pub async fn submit(
        &self,
        ctx: &RunContext,
        payload: &ApplicationPayload,
    ) -> AppResult<SubmissionReceipt> {
        tracing::debug!(
            name = %payload.name,
            email = %payload.email,
            job_title = %payload.job_title,
            "Starting application submission"
        );

        if let Err(e) = validate_payload(payload) {
            tracing::error!(error = %e, "Application validation failed");
            return Err(e);
        }

        let token = self.fetch_token(ctx).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch authorization token");
            e
        })?;

        let receipt = self.send_application(ctx, &token, payload).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to submit application");
            e
        })?;

        tracing::debug!(status = receipt.status, "Application submission finished");
        Ok(receipt)
    }

    async fn fetch_token(&self, ctx: &RunContext) -> AppResult<AuthToken> {
        let url = self.settings.secret_url.as_str();
        let transport = self.transport.as_ref();

        self.token_breaker
            .call(ctx, || {
                with_retry(ctx, &self.settings.retry, || fetch_token(transport, url))
            })
            .await
    }

    async fn send_application(
        &self,
        ctx: &RunContext,
        token: &AuthToken,
        payload: &ApplicationPayload,
    ) -> AppResult<SubmissionReceipt> {
        let body =
            serde_json::to_vec_pretty(payload).map_err(|e| AppError::Data(DataError::Encode(e)))?;
        tracing::debug!(bytes = body.len(), "Application payload encoded");

        let request = HttpRequest::new(Method::POST, self.settings.application_url.as_str())
            .header("Content-Type", CONTENT_TYPE_JSON)
            .header("Authorization", token.as_str())
            .body(body);

        self.application_breaker
            .call(ctx, || {
                with_retry(ctx, &self.settings.retry, || self.post_once(request.clone()))
            })
            .await
    }

    async fn post_once(&self, request: HttpRequest) -> AppResult<SubmissionReceipt> {
        let url = request.url.clone();
        let response = self.transport.send(request).await?;
        let receipt = SubmissionReceipt {
            status: response.status,
            body: response.text(),
        };

        if receipt.is_success() {
            tracing::info!(status = receipt.status, "Application submitted successfully");
        } else if self.settings.fail_on_error_status {
            tracing::warn!(status = receipt.status, body = %receipt.body, "Application rejected");
            return Err(AppError::Rejected {
                url,
                status: receipt.status,
            });
        } else {
            tracing::warn!(
                status = receipt.status,
                body = %receipt.body,
                "Application submission completed with non-success status"
            );
        }

        Ok(receipt)
    }
}
