//! Blocking client.
//!
//! A thin facade over the async [`EmbeddingsClient`](crate::EmbeddingsClient):
//! it owns a private current-thread Tokio runtime and drives each call
//! to completion on the calling thread. The calling thread is occupied
//! for the full round trip.
//!
//! Must not be used from within an async runtime; inside async code,
//! use the async client directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use embeddings_client::blocking::EmbeddingsClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EmbeddingsClient::from_env()?;
//!     let vector = client.embed("Hello, world!")?;
//!     println!("{} dimensions", vector.len());
//!     Ok(())
//! }
//! ```

use tokio::runtime::Runtime;

use crate::client::EmbeddingsClient as AsyncClient;
use crate::config::EmbeddingsConfig;
use crate::errors::{EmbeddingsError, EmbeddingsResult};
use crate::types::{EmbeddingsRequest, EmbeddingsResponse};

/// Blocking client for an OpenAI-compatible embeddings API.
///
/// Each operation blocks the calling thread until the provider
/// responds. Semantics are identical to the async client's; the only
/// difference is the concurrency mode.
pub struct EmbeddingsClient {
    inner: AsyncClient,
    runtime: Runtime,
}

impl EmbeddingsClient {
    /// Creates a blocking client from an explicit configuration.
    pub fn new(config: EmbeddingsConfig) -> EmbeddingsResult<Self> {
        Self::from_client(AsyncClient::new(config)?)
    }

    /// Creates a blocking client from environment variables.
    ///
    /// Reads the same variables as the async client; fails with a
    /// configuration error before any network activity when
    /// `OPENAI_API_KEY` is absent.
    pub fn from_env() -> EmbeddingsResult<Self> {
        Self::from_client(AsyncClient::from_env()?)
    }

    /// Creates a blocking client from an API key, with default settings.
    pub fn from_api_key(api_key: impl Into<String>) -> EmbeddingsResult<Self> {
        Self::from_client(AsyncClient::from_api_key(api_key)?)
    }

    /// Wraps an already-constructed async client.
    pub fn from_client(inner: AsyncClient) -> EmbeddingsResult<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| EmbeddingsError::Configuration {
                message: format!("Failed to build blocking runtime: {}", e),
            })?;

        Ok(Self { inner, runtime })
    }

    /// Embeds a single text, blocking until the vector is available.
    pub fn embed(&self, text: impl Into<String>) -> EmbeddingsResult<Vec<f32>> {
        self.runtime.block_on(self.inner.embed(text))
    }

    /// Embeds an ordered sequence of texts, blocking until done.
    pub fn embed_batch(&self, texts: Vec<String>) -> EmbeddingsResult<Vec<Vec<f32>>> {
        self.runtime.block_on(self.inner.embed_batch(texts))
    }

    /// Creates embeddings, returning the full provider response.
    pub fn create(&self, request: EmbeddingsRequest) -> EmbeddingsResult<EmbeddingsResponse> {
        self.runtime.block_on(self.inner.create(request))
    }

    /// Returns the model this client invokes.
    pub fn model(&self) -> &str {
        self.inner.model()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EmbeddingsConfig {
        self.inner.config()
    }
}

impl std::fmt::Debug for EmbeddingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::EmbeddingsClient")
            .field("inner", &self.inner)
            .finish()
    }
}
