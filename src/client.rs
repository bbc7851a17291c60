//! Embeddings API client.
//!
//! Provides the async client; the blocking facade in [`crate::blocking`]
//! wraps this one behind an owned runtime.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::auth::ApiKeyAuth;
use crate::config::{EmbeddingsConfig, EmbeddingsConfigBuilder};
use crate::errors::{ApiErrorResponse, EmbeddingsError, EmbeddingsResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{EmbeddingsRequest, EmbeddingsResponse};

/// Async client for an OpenAI-compatible embeddings API.
///
/// The client captures its credential and model at construction and
/// holds one pooled HTTP client for its lifetime. Every operation is an
/// independent request/response exchange; no state is shared between
/// calls, so one client can serve concurrent callers.
///
/// # Example
///
/// ```rust,no_run
/// use embeddings_client::EmbeddingsClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = EmbeddingsClient::from_env()?;
///
///     let vector = client.embed("Hello, world!").await?;
///     println!("{} dimensions", vector.len());
///
///     let vectors = client
///         .embed_batch(vec!["Hello, world!".to_string(), "Goodbye, world!".to_string()])
///         .await?;
///     println!("{} vectors", vectors.len());
///     Ok(())
/// }
/// ```
pub struct EmbeddingsClient {
    config: EmbeddingsConfig,
    transport: Arc<dyn HttpTransport>,
    auth: ApiKeyAuth,
}

impl EmbeddingsClient {
    /// Creates a new client builder.
    pub fn builder() -> EmbeddingsClientBuilder {
        EmbeddingsClientBuilder::new()
    }

    /// Creates a client from an explicit configuration.
    pub fn new(config: EmbeddingsConfig) -> EmbeddingsResult<Self> {
        EmbeddingsClientBuilder::new().config(config).build()
    }

    /// Creates a client from environment variables.
    ///
    /// Reads `OPENAI_API_KEY` (required) and optionally
    /// `OPENAI_BASE_URL`, `OPENAI_EMBEDDINGS_MODEL`, and
    /// `OPENAI_TIMEOUT_SECS`. Fails with a configuration error before
    /// any network activity when the key is absent.
    pub fn from_env() -> EmbeddingsResult<Self> {
        let config = EmbeddingsConfig::from_env()?;
        EmbeddingsClientBuilder::new().config(config).build()
    }

    /// Creates a client from an API key, with default settings.
    pub fn from_api_key(api_key: impl Into<String>) -> EmbeddingsResult<Self> {
        EmbeddingsClientBuilder::new().api_key(api_key).build()
    }

    /// Embeds a single text, returning its vector.
    ///
    /// The text is forwarded to the provider unmodified; empty strings
    /// are not rejected locally.
    pub async fn embed(&self, text: impl Into<String>) -> EmbeddingsResult<Vec<f32>> {
        let request = EmbeddingsRequest::new(&self.config.model, text);
        let response = self.create(request).await?;
        Self::check_count(&response, 1)?;

        let mut vectors = response.into_vectors();
        vectors
            .pop()
            .ok_or_else(|| EmbeddingsError::network("Provider returned no embedding data"))
    }

    /// Embeds an ordered sequence of texts.
    ///
    /// Returns one vector per input, in input order.
    pub async fn embed_batch(&self, texts: Vec<String>) -> EmbeddingsResult<Vec<Vec<f32>>> {
        let expected = texts.len();
        let request = EmbeddingsRequest::with_multiple(&self.config.model, texts);
        let response = self.create(request).await?;
        Self::check_count(&response, expected)?;

        Ok(response.into_vectors())
    }

    /// Creates embeddings, returning the full provider response.
    ///
    /// The convenience methods [`embed`](Self::embed) and
    /// [`embed_batch`](Self::embed_batch) are built on this; use it
    /// directly when the token usage or raw response shape is needed.
    #[instrument(skip(self, request), fields(model = %request.model, inputs = request.input.len()))]
    pub async fn create(&self, request: EmbeddingsRequest) -> EmbeddingsResult<EmbeddingsResponse> {
        let http_request = self.build_request(&request)?;

        debug!("sending embeddings request");
        let response = self.transport.send(http_request).await?;

        self.parse_response(response)
    }

    /// Returns the model this client invokes.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EmbeddingsConfig {
        &self.config
    }

    fn build_request(&self, request: &EmbeddingsRequest) -> EmbeddingsResult<HttpRequest> {
        let body = serde_json::to_vec(request)?;

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        for (name, value) in &self.config.custom_headers {
            headers.insert(name.clone(), value.clone());
        }
        self.auth.apply_auth(&mut headers);

        let mut http_request = HttpRequest::post("embeddings").with_body(body);
        http_request.headers = headers;
        Ok(http_request)
    }

    fn parse_response(&self, response: HttpResponse) -> EmbeddingsResult<EmbeddingsResponse> {
        if response.is_success() {
            response.json()
        } else {
            Err(self.parse_error_response(&response))
        }
    }

    /// Decodes the provider's error body, falling back to a
    /// status-derived message when the body is not the expected shape.
    fn parse_error_response(&self, response: &HttpResponse) -> EmbeddingsError {
        warn!(status = response.status, "provider returned an error status");

        match response.json::<ApiErrorResponse>() {
            Ok(body) => EmbeddingsError::from_api_response(response.status, body),
            Err(_) => Self::error_from_status(response.status),
        }
    }

    fn error_from_status(status: u16) -> EmbeddingsError {
        let message = match status {
            401 => "Invalid API key".to_string(),
            403 => "Forbidden".to_string(),
            404 => "Resource not found".to_string(),
            429 => "Rate limit exceeded".to_string(),
            500..=599 => format!("Server error: {}", status),
            _ => format!("Unexpected status: {}", status),
        };
        EmbeddingsError::provider(status, message)
    }

    fn check_count(response: &EmbeddingsResponse, expected: usize) -> EmbeddingsResult<()> {
        let got = response.data.len();
        if got != expected {
            return Err(EmbeddingsError::network(format!(
                "Expected {} embeddings, got {}",
                expected, got
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for EmbeddingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingsClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for [`EmbeddingsClient`].
pub struct EmbeddingsClientBuilder {
    config_builder: EmbeddingsConfigBuilder,
    config: Option<EmbeddingsConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl EmbeddingsClientBuilder {
    /// Creates a new client builder.
    pub fn new() -> Self {
        Self {
            config_builder: EmbeddingsConfigBuilder::new(),
            config: None,
            transport: None,
        }
    }

    /// Uses a complete configuration, bypassing the field setters.
    pub fn config(mut self, config: EmbeddingsConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_key(api_key);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(base_url);
        self
    }

    /// Sets the embedding model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.model(model);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets a custom transport. Intended for tests.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingsError::Configuration`] when the
    /// configuration is invalid or the HTTP client cannot be built.
    pub fn build(self) -> EmbeddingsResult<EmbeddingsClient> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let auth = ApiKeyAuth::new(config.api_key.clone());
        auth.validate()?;

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        Ok(EmbeddingsClient {
            config,
            transport,
            auth,
        })
    }
}

impl Default for EmbeddingsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
