//! Generation errors

use secure_config::{ConfigDecryptError, CredentialError, CredentialMissingError};
use thiserror::Error;

/// Errors that can occur while generating a reply
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Provider answered with a non-success status
    #[error("{provider} request failed ({status})")]
    Http { provider: &'static str, status: u16 },

    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Timeout during generation
    #[error("Request timed out")]
    RequestTimeout,

    /// Request could not be sent or read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    CredentialMissing(#[from] CredentialMissingError),

    #[error(transparent)]
    Decrypt(#[from] ConfigDecryptError),

    /// Invalid configuration or HTTP client setup
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

impl From<CredentialError> for GenerationError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Missing(e) => Self::CredentialMissing(e),
            CredentialError::Decrypt(e) => Self::Decrypt(e),
        }
    }
}
