//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! submission flow
//!     → request.rs (HttpRequest: method, url, headers, body)
//!     → transport.rs (HttpTransport trait, reqwest implementation)
//!     → request.rs (HttpResponse: status, buffered body)
//! ```

pub mod request;
pub mod transport;

pub use request::{HttpRequest, HttpResponse, Method, CONTENT_TYPE_JSON};
pub use transport::{HttpTransport, ReqwestTransport};
