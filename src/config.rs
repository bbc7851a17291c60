//! Configuration for the embeddings client.
//!
//! Credentials are always passed in explicitly through
//! [`EmbeddingsConfig`]; the environment is only consulted by the
//! [`EmbeddingsConfig::from_env`] constructor, never inside call paths.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::errors::{EmbeddingsError, EmbeddingsResult};
use crate::types::TEXT_EMBEDDING_3_SMALL;

/// Default base URL for the embeddings API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default embedding model.
pub const DEFAULT_MODEL: &str = TEXT_EMBEDDING_3_SMALL;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the embeddings client.
#[derive(Clone)]
pub struct EmbeddingsConfig {
    /// API key for authentication.
    pub api_key: SecretString,
    /// Base URL of the provider.
    pub base_url: Url,
    /// Embedding model to invoke. Immutable for the client's lifetime.
    pub model: String,
    /// Request timeout applied by the transport.
    pub timeout: Duration,
    /// Additional headers sent with every request.
    pub custom_headers: HashMap<String, String>,
}

impl EmbeddingsConfig {
    /// Creates a builder for constructing a configuration.
    pub fn builder() -> EmbeddingsConfigBuilder {
        EmbeddingsConfigBuilder::new()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENAI_API_KEY` (required): API key for authentication
    /// - `OPENAI_BASE_URL` (optional): custom base URL
    /// - `OPENAI_EMBEDDINGS_MODEL` (optional): model name
    /// - `OPENAI_TIMEOUT_SECS` (optional): request timeout in seconds
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingsError::Configuration`] when `OPENAI_API_KEY`
    /// is not set. The failure happens here, before any network
    /// activity.
    pub fn from_env() -> EmbeddingsResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            EmbeddingsError::Configuration {
                message: "OPENAI_API_KEY environment variable not set".to_string(),
            }
        })?;

        let mut builder = EmbeddingsConfigBuilder::new().api_key(api_key);

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(model) = std::env::var("OPENAI_EMBEDDINGS_MODEL") {
            builder = builder.model(model);
        }

        if let Ok(timeout_str) = std::env::var("OPENAI_TIMEOUT_SECS") {
            if let Ok(timeout_secs) = timeout_str.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(timeout_secs));
            }
        }

        builder.build()
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &SecretString {
        &self.api_key
    }

    /// Returns a hint of the API key for diagnostics (last 4 chars).
    pub fn api_key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        let char_count = key.chars().count();
        if char_count > 4 {
            let suffix: String = key.chars().skip(char_count - 4).collect();
            format!("...{}", suffix)
        } else {
            "****".to_string()
        }
    }
}

impl std::fmt::Debug for EmbeddingsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingsConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("custom_headers", &self.custom_headers)
            .finish()
    }
}

/// Builder for [`EmbeddingsConfig`].
#[derive(Default)]
pub struct EmbeddingsConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    custom_headers: HashMap<String, String>,
}

impl EmbeddingsConfigBuilder {
    /// Creates a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the embedding model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header to send with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(name.into(), value.into());
        self
    }

    /// Builds the configuration, validating its contents.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingsError::Configuration`] when the API key is
    /// missing or empty, the base URL does not parse or has a scheme
    /// other than http/https, or the timeout is zero.
    pub fn build(self) -> EmbeddingsResult<EmbeddingsConfig> {
        let api_key = self.api_key.unwrap_or_default();
        if api_key.is_empty() {
            return Err(EmbeddingsError::Configuration {
                message: "API key must not be empty".to_string(),
            });
        }

        let base_url = Url::parse(
            self.base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL),
        )?;
        if base_url.scheme() != "http" && base_url.scheme() != "https" {
            return Err(EmbeddingsError::Configuration {
                message: format!(
                    "Base URL must use http or https, got '{}'",
                    base_url.scheme()
                ),
            });
        }

        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(EmbeddingsError::Configuration {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(EmbeddingsConfig {
            api_key: SecretString::new(api_key),
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout,
            custom_headers: self.custom_headers,
        })
    }
}
