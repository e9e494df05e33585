//! HTTP transport abstraction and its `reqwest` implementation.
//!
//! # Responsibilities
//! - Expose `get` and `send` behind a trait so the submission flow can be
//!   driven by a fake in tests
//! - Enforce the per-request timeout
//! - Map transport failures to `AppError::Network` carrying the URL

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use crate::http::request::{HttpRequest, HttpResponse};

/// Minimal HTTP client used by the submission flow.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &str) -> AppResult<HttpResponse>;

    /// Send an arbitrary request.
    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse>;
}

/// `HttpTransport` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("micv/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    async fn execute(
        &self,
        url: &str,
        builder: reqwest::RequestBuilder,
    ) -> AppResult<HttpResponse> {
        let response = builder.send().await.map_err(|e| transport_error(url, e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| transport_error(url, e))?;

        tracing::debug!(url = %url, status, bytes = body.len(), "HTTP response received");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> AppResult<HttpResponse> {
        self.execute(url, self.client.get(url)).await
    }

    async fn send(&self, request: HttpRequest) -> AppResult<HttpResponse> {
        let mut builder = self.client.request(request.method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let builder = builder.body(request.body);
        self.execute(&request.url, builder).await
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        format!("failed to make request: {}", err)
    };
    AppError::network(url, message)
}
