//! Speech processing errors

use secure_config::{ConfigDecryptError, CredentialError, CredentialMissingError};
use thiserror::Error;

/// Errors raised while building speech adapters
#[derive(Debug, Error)]
pub enum SetupError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Errors that can occur while transcribing audio
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// Provider answered with a non-success status
    #[error("{}", describe_http(.provider, *.status, .detail.as_deref()))]
    Http {
        provider: &'static str,
        status: u16,
        detail: Option<String>,
    },

    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP client timeout
    #[error("Request timed out")]
    RequestTimeout,

    /// Request could not be sent or read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Audio payload unusable
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    #[error(transparent)]
    CredentialMissing(#[from] CredentialMissingError),

    #[error(transparent)]
    Decrypt(#[from] ConfigDecryptError),

    /// Media upload to the object store failed
    #[error("AWS S3 upload failed: {0}")]
    Upload(String),

    /// Transcription job could not be started
    #[error("AWS Transcribe start failed: {0}")]
    JobStart(String),

    /// Job status could not be read
    #[error("AWS Transcribe status failed: {0}")]
    JobStatus(String),

    /// Job output could not be read back
    #[error("Failed to read AWS transcript from {location}: {detail}")]
    TranscriptFetch { location: String, detail: String },

    /// The service reported the job as failed
    #[error("{0}")]
    JobFailed(String),

    /// Polling exhausted before the job completed
    #[error("{}", describe_timeout(.last_status.as_deref()))]
    Timeout { last_status: Option<String> },

    /// No adapter could be called and no local transcript was captured
    #[error("No transcript captured. {0}")]
    NotCallable(String),

    /// Every source produced an empty transcript
    #[error("Transcription was empty.")]
    Empty,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors that can occur while synthesizing or playing speech
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Provider answered with a non-success status
    #[error("{}", describe_http(.provider, *.status, .detail.as_deref()))]
    Http {
        provider: &'static str,
        status: u16,
        detail: Option<String>,
    },

    /// Failed to connect to the provider
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP client timeout
    #[error("Request timed out")]
    RequestTimeout,

    /// Request could not be sent or read
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Provider answered successfully but without audio
    #[error("{0}")]
    MissingAudio(String),

    #[error(transparent)]
    CredentialMissing(#[from] CredentialMissingError),

    #[error(transparent)]
    Decrypt(#[from] ConfigDecryptError),

    /// Audio sink could not play the result
    #[error("Audio playback failed: {0}")]
    Playback(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

fn describe_http(provider: &str, status: u16, detail: Option<&str>) -> String {
    match detail {
        Some(detail) => format!("{provider} request failed ({status}): {detail}"),
        None => format!("{provider} request failed ({status})"),
    }
}

fn describe_timeout(last_status: Option<&str>) -> String {
    match last_status {
        Some(status) => format!("AWS Transcribe timed out while status={status}."),
        None => "AWS Transcribe timed out before transcript became available.".to_string(),
    }
}

impl From<reqwest::Error> for TranscriptionError {
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

impl From<reqwest::Error> for SynthesisError {
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

impl From<CredentialError> for TranscriptionError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Missing(e) => Self::CredentialMissing(e),
            CredentialError::Decrypt(e) => Self::Decrypt(e),
        }
    }
}

impl From<CredentialError> for SynthesisError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Missing(e) => Self::CredentialMissing(e),
            CredentialError::Decrypt(e) => Self::Decrypt(e),
        }
    }
}
