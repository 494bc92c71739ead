//! Errors raised while reading configuration

use thiserror::Error;

/// Low-level cipher failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Nothing follows the cipher prefix
    #[error("ciphertext is empty")]
    Empty,

    /// The payload is not valid base64
    #[error("ciphertext is not valid base64")]
    Encoding,

    /// Payload shorter than a nonce
    #[error("ciphertext too short - missing nonce")]
    Truncated,

    /// AEAD tag check failed: wrong key or corrupted ciphertext
    #[error("authentication failed - wrong key or corrupted ciphertext")]
    Authentication,

    /// Decrypted bytes do not start with the integrity marker
    #[error("integrity marker missing")]
    MissingMarker,

    /// Decrypted bytes are not UTF-8
    #[error("plaintext is not valid UTF-8")]
    Utf8,

    /// Sealing a value failed
    #[error("encryption failed")]
    Encryption,
}

/// An encrypted configuration value could not be decrypted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to decrypt configuration value {key}: {reason}")]
pub struct ConfigDecryptError {
    /// Configuration key that was read
    pub key: String,
    /// Why decryption failed
    pub reason: CipherError,
}

/// A provider lacks one or more required configuration keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{provider} is not configured: {}", describe_missing(.missing))]
pub struct CredentialMissingError {
    /// Provider display name
    pub provider: &'static str,
    /// Missing keys, in descriptor order
    pub missing: Vec<&'static str>,
}

fn describe_missing(missing: &[&str]) -> String {
    if missing.is_empty() {
        "no configuration keys are defined".to_string()
    } else {
        format!("missing {}", missing.join(", "))
    }
}

/// Failure to resolve a provider's credentials for a call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error(transparent)]
    Missing(#[from] CredentialMissingError),

    #[error(transparent)]
    Decrypt(#[from] ConfigDecryptError),
}
