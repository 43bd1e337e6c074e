//! Error types for credential resolution and token exchange.

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, OAuthError>;

/// Errors raised while talking to the identity provider.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// Connection, timeout or body-read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider rejected the request or answered without a token.
    #[error("Provider error ({status}): {body}")]
    Provider {
        /// Status line, e.g. `401 Unauthorized`.
        status: String,
        /// Raw response body.
        body: String,
    },

    /// The issuer does not form a valid token endpoint URL.
    #[error("Invalid issuer: {0}")]
    InvalidIssuer(String),

    /// A grant was built from inputs that lack a required field.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

impl OAuthError {
    /// Check if the provider answered with an error.
    #[cfg(test)]
    pub(crate) fn is_provider_error(&self) -> bool {
        matches!(self, OAuthError::Provider { .. })
    }
}

impl From<reqwest::Error> for OAuthError {
    fn from(e: reqwest::Error) -> Self {
        OAuthError::Transport(e.to_string())
    }
}

/// Errors raised while collecting inputs.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Reading an interactive answer failed.
    #[error("Failed to read {field}: {source}")]
    Prompt {
        field: &'static str,
        #[source]
        source: std::io::Error,
    },
}
