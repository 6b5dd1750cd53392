//! HTTP port - JSON requests against the auth API.

use async_trait::async_trait;
use serde_json::Value;

/// A response that arrived, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Parsed JSON body; `Null` when the body was empty or not JSON.
    pub body: Value,
}

impl HttpResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client trait - abstraction over the transport.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST `body` as JSON to `path`, relative to the serving origin.
    ///
    /// Any status is `Ok`; `Err` means no response was received.
    async fn post_json(&self, path: &str, body: Value) -> Result<HttpResponse, TransportError>;
}

/// Transport errors.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),
}
