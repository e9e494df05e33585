//! Shared utilities for integration testing.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use micv::resilience::RetryConfig;

/// One scripted response from the mock API.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    pub fn token(token: &str) -> Self {
        Self::new(200, format!(r#"{{"result":"{}"}}"#, token))
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

type Responder = Box<dyn Fn(u32) -> Reply + Send + Sync>;

struct MockState {
    secret: Responder,
    application: Responder,
    secret_hits: AtomicU32,
    application_hits: AtomicU32,
    authorizations: Mutex<Vec<Option<String>>>,
    content_types: Mutex<Vec<Option<String>>>,
    bodies: Mutex<Vec<serde_json::Value>>,
}

/// A running mock of the secret and application endpoints.
pub struct MockApi {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

#[allow(dead_code)]
impl MockApi {
    pub fn secret_url(&self) -> String {
        format!("http://{}/secret", self.addr)
    }

    pub fn application_url(&self) -> String {
        format!("http://{}/apply", self.addr)
    }

    pub fn secret_hits(&self) -> u32 {
        self.state.secret_hits.load(Ordering::SeqCst)
    }

    pub fn application_hits(&self) -> u32 {
        self.state.application_hits.load(Ordering::SeqCst)
    }

    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.state.authorizations.lock().unwrap().clone()
    }

    pub fn content_types(&self) -> Vec<Option<String>> {
        self.state.content_types.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<serde_json::Value> {
        self.state.bodies.lock().unwrap().clone()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
}

async fn reply(reply: Reply) -> (StatusCode, String) {
    if !reply.delay.is_zero() {
        tokio::time::sleep(reply.delay).await;
    }
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, reply.body)
}

async fn secret_handler(State(state): State<Arc<MockState>>) -> (StatusCode, String) {
    let n = state.secret_hits.fetch_add(1, Ordering::SeqCst) + 1;
    reply((state.secret)(n)).await
}

async fn application_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let n = state.application_hits.fetch_add(1, Ordering::SeqCst) + 1;
    state.authorizations.lock().unwrap().push(header(&headers, "authorization"));
    state.content_types.lock().unwrap().push(header(&headers, "content-type"));
    if let Ok(value) = serde_json::from_slice(&body) {
        state.bodies.lock().unwrap().push(value);
    }
    reply((state.application)(n)).await
}

/// Start a programmable mock API on an ephemeral port.
///
/// Each responder receives the 1-based hit count for its endpoint.
pub async fn start_mock_api<S, A>(secret: S, application: A) -> MockApi
where
    S: Fn(u32) -> Reply + Send + Sync + 'static,
    A: Fn(u32) -> Reply + Send + Sync + 'static,
{
    let state = Arc::new(MockState {
        secret: Box::new(secret),
        application: Box::new(application),
        secret_hits: AtomicU32::new(0),
        application_hits: AtomicU32::new(0),
        authorizations: Mutex::new(Vec::new()),
        content_types: Mutex::new(Vec::new()),
        bodies: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/secret", get(secret_handler))
        .route("/apply", post(application_handler))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockApi { addr, state }
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Retry policy with millisecond delays so failing tests stay quick.
#[allow(dead_code)]
pub fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig::new(max_attempts, Duration::from_millis(10), Duration::from_millis(50), 2.0)
}
