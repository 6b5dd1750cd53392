//! Auth API client over reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use floward_core::ClientConfig;
use floward_core::ports::{HttpClient, HttpResponse, TransportError};

/// JSON-over-HTTP client for the auth API, rooted at the serving origin.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Request(format!("Building HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path)
            .map_err(|e| TransportError::Endpoint(format!("{path}: {e}")))
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(&self, path: &str, body: Value) -> Result<HttpResponse, TransportError> {
        let url = self.endpoint(path)?;

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        // Error pages are not always JSON; the caller falls back to its own text.
        let body = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            if !bytes.is_empty() {
                tracing::debug!(path, status, error = %e, "Response body is not JSON");
            }
            Value::Null
        });

        Ok(HttpResponse::new(status, body))
    }
}
