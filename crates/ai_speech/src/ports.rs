//! Port definitions for speech processing
//!
//! Defines the traits (ports) that speech adapters implement, plus the
//! storage and job seams used by the AWS Transcribe batch adapter.

use async_trait::async_trait;
use bytes::Bytes;
use domain::ProviderId;

use crate::aws::{AwsCredentials, AwsError, JobSnapshot, TranscriptionJobRequest};
use crate::error::{SynthesisError, TranscriptionError};
use crate::types::{AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};

/// Port for Speech-to-Text (STT) implementations
///
/// Implementations resolve their credentials through the
/// [`CredentialGate`](secure_config::CredentialGate) before any network call.
///
/// # Example
///
/// ```ignore
/// use ai_speech::{AudioPayload, SpeechToText, TranscriptionError};
///
/// async fn transcript_of(
///     stt: &dyn SpeechToText,
///     audio: &AudioPayload,
/// ) -> Result<String, TranscriptionError> {
///     Ok(stt.transcribe(audio).await?.text)
/// }
/// ```
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Catalog entry this adapter serves
    fn provider(&self) -> ProviderId;

    /// Transcribe recorded audio
    ///
    /// The payload is borrowed for the duration of the call only.
    ///
    /// # Errors
    ///
    /// Returns `TranscriptionError` on missing credentials, transport
    /// failures, non-success statuses or unexpected response shapes.
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError>;
}

/// Port for Text-to-Speech (TTS) implementations
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Catalog entry this adapter serves
    fn provider(&self) -> ProviderId;

    /// Render text as audio
    ///
    /// # Errors
    ///
    /// Returns `SynthesisError` if the provider cannot produce audio.
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError>;
}

/// Object storage used for batch transcription media and output
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        key: &str,
        body: &[u8],
        content_type: &str,
    ) -> Result<(), AwsError>;

    async fn get_object(
        &self,
        credentials: &AwsCredentials,
        bucket: &str,
        key: &str,
    ) -> Result<Bytes, AwsError>;
}

/// Start and inspect batch transcription jobs
#[async_trait]
pub trait TranscriptionJobs: Send + Sync {
    async fn start_job(
        &self,
        credentials: &AwsCredentials,
        request: &TranscriptionJobRequest,
    ) -> Result<(), AwsError>;

    async fn job_status(
        &self,
        credentials: &AwsCredentials,
        job_name: &str,
    ) -> Result<JobSnapshot, AwsError>;
}
