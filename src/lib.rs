//! Embeddings Client Library
//!
//! A minimal Rust client for OpenAI-compatible text embedding APIs.
//! Converts one or more texts into embedding vectors by delegating to
//! the provider's `/embeddings` endpoint, with both async and blocking
//! calling modes.
//!
//! # Features
//!
//! - **Single and Batch**: embed one text or an ordered sequence;
//!   batch results come back positionally aligned with the input
//! - **Async and Blocking**: one async implementation, plus a blocking
//!   facade that drives it behind an owned runtime
//! - **Explicit Configuration**: credentials are injected through
//!   [`EmbeddingsConfig`]; environment reads happen only in the
//!   `from_env` constructors
//! - **Typed Errors**: configuration failures and provider failures,
//!   nothing else; provider errors carry the status and message
//! - **Testable**: transport seam with a mock implementation behind
//!   the `mocks` feature
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use embeddings_client::EmbeddingsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EmbeddingsClient::builder()
//!         .api_key("sk-your-api-key")
//!         .build()?;
//!
//!     let vector = client.embed("Hello, world!").await?;
//!     println!("{} dimensions", vector.len());
//!
//!     let vectors = client
//!         .embed_batch(vec!["Hello, world!".to_string(), "Goodbye, world!".to_string()])
//!         .await?;
//!     println!("{} vectors", vectors.len());
//!     Ok(())
//! }
//! ```
//!
//! # Blocking Example
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

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod blocking;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

#[cfg(test)]
pub mod fixtures;

// Re-exports for convenience
pub use client::{EmbeddingsClient, EmbeddingsClientBuilder};
pub use config::{EmbeddingsConfig, EmbeddingsConfigBuilder};
pub use errors::{EmbeddingsError, EmbeddingsResult};

// Type re-exports
pub use types::{
    known_dimensions, Embedding, EmbeddingInput, EmbeddingUsage, EmbeddingsRequest,
    EmbeddingsResponse, TEXT_EMBEDDING_3_LARGE, TEXT_EMBEDDING_3_SMALL, TEXT_EMBEDDING_ADA_002,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::client::{EmbeddingsClient, EmbeddingsClientBuilder};
    pub use crate::config::EmbeddingsConfig;
    pub use crate::errors::{EmbeddingsError, EmbeddingsResult};
    pub use crate::types::{EmbeddingsRequest, EmbeddingsResponse};
}
