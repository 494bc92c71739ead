//! Transcription orchestrator - Cloud STT with local transcript fallback

use std::sync::Arc;

use ai_speech::{AudioPayload, TranscriptionError};
use domain::{ProviderId, TurnSource};
use tracing::{debug, info, instrument, warn};

use crate::error::PipelineError;
use crate::registry::ProviderRegistry;

/// Text produced by a stage, who produced it and any notice to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutput {
    pub text: String,
    pub source: TurnSource,
    pub notice: Option<String>,
}

/// Picks the STT adapter for a turn and applies the fallback policy
#[derive(Debug, Clone)]
pub struct TranscriptionOrchestrator {
    registry: Arc<ProviderRegistry>,
}

impl TranscriptionOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Transcribe `audio` with `provider`.
    ///
    /// `local_transcript` is what the on-device recognizer heard; it replaces
    /// a failed or uncallable provider when non-blank, except for batch-job
    /// providers whose failures always surface.
    #[instrument(skip(self, audio, local_transcript), fields(provider = %provider, audio_size = audio.len()))]
    pub async fn transcribe(
        &self,
        provider: ProviderId,
        audio: &AudioPayload,
        local_transcript: &str,
    ) -> Result<StageOutput, PipelineError> {
        let descriptor = provider.descriptor();
        if provider.is_batch_job() {
            self.registry.gate().require(descriptor)?;
        }

        let local = local_transcript.trim();
        let fallback_allowed = !local.is_empty() && !provider.is_batch_job();

        let output = match self.registry.stt(provider) {
            Some(adapter) => match adapter.transcribe(audio).await {
                Ok(transcription) => StageOutput {
                    text: transcription.text,
                    source: TurnSource::Provider(provider),
                    notice: None,
                },
                Err(err) if fallback_allowed => {
                    warn!(error = %err, "Cloud STT failed, using local transcript");
                    StageOutput {
                        text: local.to_string(),
                        source: TurnSource::LocalFallback,
                        notice: Some(format!(
                            "Cloud STT failed ({err}). Used local speech transcript fallback."
                        )),
                    }
                },
                Err(err) => return Err(err.into()),
            },
            None if !local.is_empty() => {
                info!("Provider not callable, using local transcript");
                StageOutput {
                    text: local.to_string(),
                    source: TurnSource::LocalFallback,
                    notice: Some(format!(
                        "{} Used local speech transcript fallback.",
                        self.registry.readiness_note(provider)
                    )),
                }
            },
            None => {
                return Err(
                    TranscriptionError::NotCallable(self.registry.readiness_note(provider)).into(),
                );
            },
        };

        if output.text.trim().is_empty() {
            return Err(TranscriptionError::Empty.into());
        }

        debug!(source = %output.source, chars = output.text.len(), "Transcript ready");
        Ok(output)
    }
}
