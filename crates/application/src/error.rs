//! Application-level errors

use ai_core::GenerationError;
use ai_speech::TranscriptionError;
use domain::{DomainError, PipelineState, Stage};
use secure_config::CredentialMissingError;
use thiserror::Error;

/// Failures of the capture device or its recording
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The user or the platform refused access to the device
    #[error("Microphone permission was denied.")]
    PermissionDenied,

    /// No capture device could be opened
    #[error("Capture device unavailable: {0}")]
    Unavailable(String),

    /// Recording failed after the device was opened
    #[error("Recording failed: {0}")]
    Recording(String),
}

/// Failures that abort a conversation turn
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A batch provider was selected without its keys
    #[error(transparent)]
    CredentialMissing(#[from] CredentialMissingError),

    /// Speech-to-text failed and no fallback applied
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    /// Response generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Recording could not start or finish
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// A stage has no provider selected
    #[error("Select a {0} provider before recording.")]
    NoProviderSelected(Stage),

    /// A turn is already in flight
    #[error("A conversation turn is already in progress ({0}).")]
    Busy(PipelineState),
}

impl PipelineError {
    /// Whether the failure came from missing or unreadable configuration
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::CredentialMissing(_)
                | Self::Transcription(TranscriptionError::CredentialMissing(_) | TranscriptionError::Decrypt(_))
                | Self::Generation(GenerationError::CredentialMissing(_) | GenerationError::Decrypt(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_message_passes_through() {
        let err: PipelineError = TranscriptionError::Empty.into();
        assert_eq!(err.to_string(), "Transcription was empty.");
    }

    #[test]
    fn missing_selection_names_stage() {
        let err = PipelineError::NoProviderSelected(Stage::Tts);
        assert_eq!(err.to_string(), "Select a TTS provider before recording.");
    }

    #[test]
    fn missing_credentials_are_configuration_errors() {
        let err: PipelineError = CredentialMissingError {
            provider: "AWS Transcribe",
            missing: vec!["AWS_TRANSCRIBE_BUCKET"],
        }
        .into();
        assert!(err.is_configuration());
        assert!(!PipelineError::Busy(PipelineState::Generating).is_configuration());
    }
}
