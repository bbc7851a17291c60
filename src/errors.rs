//! Error types for the embeddings client.
//!
//! The client distinguishes exactly two failure kinds: configuration
//! problems raised while constructing a client, and provider problems
//! raised while talking to the embedding API. Everything that happens
//! during an outbound call (network failure, authentication rejection,
//! provider fault, undecodable body) is a provider error carrying the
//! provider's status and message when they are available.

use thiserror::Error;

/// Result type alias for embeddings operations.
pub type EmbeddingsResult<T> = Result<T, EmbeddingsError>;

/// Error type for embeddings client operations.
#[derive(Debug, Clone, Error)]
pub enum EmbeddingsError {
    /// Configuration error (missing API key, invalid base URL, etc.).
    ///
    /// Raised while constructing a client or its configuration, before
    /// any network activity. Not recoverable within the client.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// Provider error: any failure during an outbound call.
    ///
    /// Covers network and timeout failures (no status), authentication
    /// rejections, provider-side faults, and response bodies the client
    /// could not decode. Propagated to the caller unchanged; the client
    /// remains usable for subsequent calls.
    #[error("Provider error: {message}")]
    Provider {
        /// HTTP status reported by the provider, when a response was
        /// received at all.
        status: Option<u16>,
        /// Human-readable message from the provider or the transport.
        message: String,
        /// Machine-readable error type from the provider body, if any.
        error_type: Option<String>,
        /// Machine-readable error code from the provider body, if any.
        error_code: Option<String>,
    },
}

impl EmbeddingsError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        EmbeddingsError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a provider error for a response with a known status.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        EmbeddingsError::Provider {
            status: Some(status),
            message: message.into(),
            error_type: None,
            error_code: None,
        }
    }

    /// Creates a provider error for a failure before any response
    /// arrived (connection refused, DNS, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        EmbeddingsError::Provider {
            status: None,
            message: message.into(),
            error_type: None,
            error_code: None,
        }
    }

    /// Creates a provider error from a decoded API error body.
    pub fn from_api_response(status: u16, response: ApiErrorResponse) -> Self {
        EmbeddingsError::Provider {
            status: Some(status),
            message: response.error.message,
            error_type: response.error.error_type,
            error_code: response.error.code,
        }
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            EmbeddingsError::Provider { status, .. } => *status,
            EmbeddingsError::Configuration { .. } => None,
        }
    }

    /// Returns true if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, EmbeddingsError::Configuration { .. })
    }

    /// Returns true if this is a provider error.
    pub fn is_provider(&self) -> bool {
        matches!(self, EmbeddingsError::Provider { .. })
    }

    /// Returns true if the provider rejected the credential (401/403).
    pub fn is_authentication(&self) -> bool {
        matches!(
            self,
            EmbeddingsError::Provider {
                status: Some(401 | 403),
                ..
            }
        )
    }
}

/// API error response body from the provider.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    /// The error details.
    pub error: ApiErrorDetail,
}

/// Detailed API error information.
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorDetail {
    /// The error message.
    pub message: String,
    /// The error type.
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// The parameter that caused the error.
    pub param: Option<String>,
    /// The error code.
    pub code: Option<String>,
}

impl From<reqwest::Error> for EmbeddingsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EmbeddingsError::network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            EmbeddingsError::network(format!("Connection failed: {}", err))
        } else {
            EmbeddingsError::Provider {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
                error_type: None,
                error_code: None,
            }
        }
    }
}

impl From<serde_json::Error> for EmbeddingsError {
    fn from(err: serde_json::Error) -> Self {
        EmbeddingsError::network(format!("Invalid JSON payload: {}", err))
    }
}

impl From<url::ParseError> for EmbeddingsError {
    fn from(err: url::ParseError) -> Self {
        EmbeddingsError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}
