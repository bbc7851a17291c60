//! API key authentication.

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::{EmbeddingsError, EmbeddingsResult};

/// Bearer-token authentication using the provider API key.
pub struct ApiKeyAuth {
    api_key: SecretString,
}

impl ApiKeyAuth {
    /// Creates a new API key authenticator.
    pub fn new(api_key: SecretString) -> Self {
        Self { api_key }
    }

    /// Creates an authenticator from a string API key.
    pub fn from_string(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
        }
    }

    /// Applies the `Authorization: Bearer` header to a request.
    pub fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );
    }

    /// Gets a hint of the API key for diagnostics (last 4 characters).
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        let char_count = key.chars().count();
        if char_count > 4 {
            let suffix: String = key.chars().skip(char_count - 4).collect();
            format!("...{}", suffix)
        } else {
            "****".to_string()
        }
    }

    /// Validates the credential shape.
    ///
    /// An empty key is a configuration error. A key without the usual
    /// `sk-` prefix is accepted with a warning, since proxies and
    /// compatible providers issue differently shaped keys.
    pub fn validate(&self) -> EmbeddingsResult<()> {
        let key = self.api_key.expose_secret();

        if key.is_empty() {
            return Err(EmbeddingsError::Configuration {
                message: "API key must not be empty".to_string(),
            });
        }

        if !key.starts_with("sk-") {
            tracing::warn!(
                key_hint = %self.key_hint(),
                "API key does not match the expected sk- format"
            );
        }

        Ok(())
    }
}

impl std::fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .finish()
    }
}
