//! Request and response types for the embeddings API.
//!
//! These mirror the provider's wire schema: a request carries a model
//! name and one or more input texts, a response carries one embedding
//! per input plus token usage accounting.

use serde::{Deserialize, Serialize};

/// Small embedding model, the default. 1536 dimensions.
pub const TEXT_EMBEDDING_3_SMALL: &str = "text-embedding-3-small";

/// Large embedding model. 3072 dimensions.
pub const TEXT_EMBEDDING_3_LARGE: &str = "text-embedding-3-large";

/// Legacy embedding model. 1536 dimensions.
pub const TEXT_EMBEDDING_ADA_002: &str = "text-embedding-ada-002";

/// Returns the output dimension count for a known model name.
///
/// Returns `None` for model names this crate does not recognize; the
/// provider remains the authority on the actual dimension count.
pub fn known_dimensions(model: &str) -> Option<u32> {
    match model {
        TEXT_EMBEDDING_3_SMALL | TEXT_EMBEDDING_ADA_002 => Some(1536),
        TEXT_EMBEDDING_3_LARGE => Some(3072),
        _ => None,
    }
}

/// Request body for the embeddings endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingsRequest {
    /// Model name to invoke.
    pub model: String,
    /// Input text(s) to embed.
    pub input: EmbeddingInput,

    /// Encoding for the returned vectors (`float` or `base64`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<String>,

    /// Requested output dimension count, on models that support it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,

    /// End-user identifier forwarded to the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Input text(s) for an embeddings request.
///
/// Serializes untagged: a single input becomes a JSON string, multiple
/// inputs become a JSON array of strings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// One text.
    Single(String),
    /// An ordered sequence of texts.
    Multiple(Vec<String>),
}

impl EmbeddingInput {
    /// Number of texts carried by this input.
    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Single(_) => 1,
            EmbeddingInput::Multiple(texts) => texts.len(),
        }
    }

    /// Returns true if this input carries no texts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for EmbeddingInput {
    fn from(text: String) -> Self {
        EmbeddingInput::Single(text)
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        EmbeddingInput::Single(text.to_string())
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(texts: Vec<String>) -> Self {
        EmbeddingInput::Multiple(texts)
    }
}

/// Response body from the embeddings endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsResponse {
    /// Object type, always `"list"`.
    pub object: String,
    /// One embedding per input text.
    pub data: Vec<Embedding>,
    /// Model that produced the embeddings.
    pub model: String,
    /// Token usage for the request.
    pub usage: EmbeddingUsage,
}

/// A single embedding datum.
#[derive(Debug, Clone, Deserialize)]
pub struct Embedding {
    /// Object type, always `"embedding"`.
    pub object: String,
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// Position of the corresponding input in the request.
    pub index: u32,
}

/// Token usage reported by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingUsage {
    /// Tokens consumed by the input text(s).
    pub prompt_tokens: u32,
    /// Total tokens billed for the request.
    pub total_tokens: u32,
}

impl EmbeddingsRequest {
    /// Creates a request embedding a single text.
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingInput::Single(input.into()),
            encoding_format: None,
            dimensions: None,
            user: None,
        }
    }

    /// Creates a request embedding an ordered sequence of texts.
    pub fn with_multiple(model: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingInput::Multiple(inputs),
            encoding_format: None,
            dimensions: None,
            user: None,
        }
    }

    /// Requests a specific output dimension count.
    pub fn with_dimensions(mut self, dims: u32) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Sets the encoding format for the returned vectors.
    pub fn with_encoding_format(mut self, format: impl Into<String>) -> Self {
        self.encoding_format = Some(format.into());
        self
    }

    /// Attaches an end-user identifier.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }
}

impl EmbeddingsResponse {
    /// Extracts the embedding vectors ordered by their `index` field.
    ///
    /// The provider communicates result ordering through `index`; this
    /// restores input order even if the data array arrives shuffled.
    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        let mut data = self.data;
        data.sort_by_key(|d| d.index);
        data.into_iter().map(|d| d.embedding).collect()
    }
}
