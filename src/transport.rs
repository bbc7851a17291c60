//! HTTP transport layer.
//!
//! The transport is the seam between the client and the network: an
//! object-safe [`HttpTransport`] trait over plain request/response
//! values, with a reqwest-backed implementation. Tests substitute a
//! mock transport through the client builder.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::config::EmbeddingsConfig;
use crate::errors::{EmbeddingsError, EmbeddingsResult};

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET request.
    Get,
    /// POST request.
    Post,
}

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request path, relative to the transport's base URL.
    pub path: String,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub body: Option<Vec<u8>>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Creates a new POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the transport timeout for this request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> EmbeddingsResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}

/// HTTP transport trait.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends an HTTP request and returns the raw response.
    async fn send(&self, request: HttpRequest) -> EmbeddingsResult<HttpResponse>;
}

/// HTTP transport implementation using reqwest.
///
/// Holds a single `reqwest::Client` for the transport's lifetime;
/// reqwest pools connections internally, so calls reuse connections
/// without any pooling logic here.
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a new transport from configuration.
    pub fn new(config: &EmbeddingsConfig) -> EmbeddingsResult<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EmbeddingsError::Configuration {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Builds the full URL for a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = ?request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> EmbeddingsResult<HttpResponse> {
        let url = self.build_url(&request.path);

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };

        for (name, value) in &request.headers {
            req_builder = req_builder.header(name, value);
        }

        if let Some(body) = request.body {
            req_builder = req_builder.body(body);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config(base_url: &str) -> EmbeddingsConfig {
        EmbeddingsConfig::builder()
            .api_key("sk-test-key")
            .base_url(base_url)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_url_trims_slashes() {
        let transport = ReqwestTransport::new(&test_config("https://example.com/v1/")).unwrap();
        assert_eq!(
            transport.build_url("/embeddings"),
            "https://example.com/v1/embeddings"
        );

        let transport = ReqwestTransport::new(&test_config("https://example.com/v1")).unwrap();
        assert_eq!(
            transport.build_url("embeddings"),
            "https://example.com/v1/embeddings"
        );
    }

    #[test]
    fn test_request_builders() {
        let request = HttpRequest::post("embeddings")
            .with_header("Content-Type", "application/json")
            .with_body(b"{}".to_vec())
            .with_timeout(Duration::from_secs(5));

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "embeddings");
        assert_eq!(
            request.headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(request.body, Some(b"{}".to_vec()));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));

        let get = HttpRequest::get("models");
        assert_eq!(get.method, HttpMethod::Get);
        assert!(get.body.is_none());
    }

    #[test]
    fn test_response_is_success() {
        let ok = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        assert!(ok.is_success());

        let err = HttpResponse {
            status: 401,
            headers: HashMap::new(),
            body: Bytes::new(),
        };
        assert!(!err.is_success());
    }

    #[test]
    fn test_response_json_decodes_body() {
        let body = serde_json::to_vec(&json!({"error": {"message": "nope"}})).unwrap();
        let response = HttpResponse {
            status: 400,
            headers: HashMap::new(),
            body: Bytes::from(body),
        };

        let decoded: crate::errors::ApiErrorResponse = response.json().unwrap();
        assert_eq!(decoded.error.message, "nope");
    }

    #[test]
    fn test_response_json_rejects_invalid_body() {
        let response = HttpResponse {
            status: 200,
            headers: HashMap::new(),
            body: Bytes::from_static(b"not json"),
        };

        let err = response.json::<crate::errors::ApiErrorResponse>().unwrap_err();
        assert!(err.is_provider());
    }
}
