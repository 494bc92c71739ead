//! AWS plumbing for the Transcribe and Polly adapters
//!
//! Requests to JSON services are signed with [`signing`]; S3 access goes
//! through `rust-s3`, which signs its own requests.

pub mod object_store;
pub mod signing;
pub mod transcribe;

use secure_config::ResolvedCredentials;
use serde::Serialize;
use thiserror::Error;

pub use self::object_store::S3ObjectStore;
pub use self::signing::{SignedHeaders, sign_request};
pub use self::transcribe::TranscribeJobClient;

/// Configuration keys read for every AWS call
pub const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const REGION: &str = "AWS_REGION";
pub const TRANSCRIBE_BUCKET: &str = "AWS_TRANSCRIBE_BUCKET";

/// Static AWS credentials plus the target region
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("region", &self.region)
            .finish()
    }
}

impl AwsCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
        }
    }

    /// Build from keys already checked by the credential gate
    pub fn from_resolved(credentials: &ResolvedCredentials) -> Self {
        Self::new(
            credentials.get(ACCESS_KEY_ID),
            credentials.get(SECRET_ACCESS_KEY),
            credentials.get(REGION),
        )
    }
}

/// Errors from AWS storage and job calls
#[derive(Debug, Error)]
pub enum AwsError {
    /// Service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Request could not be sent
    #[error("{0}")]
    Transport(String),

    /// Object storage client error
    #[error("{0}")]
    Storage(String),

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// Request could not be signed
    #[error("request signing failed: {0}")]
    Signing(String),
}

impl From<reqwest::Error> for AwsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Parameters for starting a batch transcription job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TranscriptionJobRequest {
    #[serde(rename = "TranscriptionJobName")]
    pub job_name: String,
    pub language_code: String,
    pub media_format: String,
    pub media: MediaLocation,
    pub output_bucket_name: String,
    pub output_key: String,
}

/// Location of the uploaded media
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaLocation {
    #[serde(rename = "MediaFileUri")]
    pub media_file_uri: String,
}

/// Status of a batch transcription job at one poll
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSnapshot {
    /// Status as reported (`QUEUED`, `IN_PROGRESS`, `COMPLETED`, `FAILED`)
    pub status: String,
    pub failure_reason: Option<String>,
}

impl JobSnapshot {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            failure_reason: None,
        }
    }

    #[must_use]
    pub fn failed(reason: Option<&str>) -> Self {
        Self {
            status: "FAILED".to_string(),
            failure_reason: reason.map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == "COMPLETED"
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == "FAILED"
    }
}
