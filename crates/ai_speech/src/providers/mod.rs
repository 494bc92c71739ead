//! Speech processing provider implementations
//!
//! One adapter per catalog entry. Every adapter resolves its credentials
//! through the shared [`ProviderContext`] before the first network call.

pub mod aws_transcribe;
pub mod azure;
pub mod deepgram;
pub mod elevenlabs;
pub mod google;
pub mod murf;
pub mod openai;
pub mod polly;

use std::sync::Arc;

use domain::ProviderId;
use reqwest::Client;
use secure_config::{CredentialError, CredentialGate, ResolvedCredentials};

pub use aws_transcribe::AwsTranscribeProvider;
pub use azure::{AzureSttProvider, AzureTtsProvider};
pub use deepgram::DeepgramProvider;
pub use elevenlabs::{ElevenLabsSttProvider, ElevenLabsTtsProvider};
pub use google::{GoogleSttProvider, GoogleTtsProvider};
pub use murf::{MurfFalconProvider, MurfTtsProvider};
pub use openai::{OpenAiTtsProvider, WhisperProvider};
pub use polly::PollyProvider;

use crate::config::SpeechConfig;
use crate::error::{SetupError, TranscriptionError};
use crate::http::build_client;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::AudioPayload;

/// What every cloud adapter needs: an HTTP client, settings and the gate
#[derive(Debug, Clone)]
pub struct ProviderContext {
    client: Client,
    config: Arc<SpeechConfig>,
    gate: CredentialGate,
}

impl ProviderContext {
    pub fn new(client: Client, config: SpeechConfig, gate: CredentialGate) -> Self {
        Self {
            client,
            config: Arc::new(config),
            gate,
        }
    }

    /// Validate `config` and build a client honouring its timeout
    pub fn from_config(config: SpeechConfig, gate: CredentialGate) -> Result<Self, SetupError> {
        let client = build_client(&config)?;
        Ok(Self::new(client, config, gate))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }

    pub fn gate(&self) -> &CredentialGate {
        &self.gate
    }

    /// Resolve the keys of `provider` for one call
    pub(crate) fn credentials(&self, provider: ProviderId) -> Result<ResolvedCredentials, CredentialError> {
        self.gate.resolve(provider.descriptor())
    }
}

/// Cloud transcription adapter for `id`; `None` for other stages and
/// providers without an adapter
pub fn stt_adapter(id: ProviderId, ctx: &ProviderContext) -> Option<Arc<dyn SpeechToText>> {
    let ctx = ctx.clone();
    let adapter: Arc<dyn SpeechToText> = match id {
        ProviderId::AzureStt => Arc::new(AzureSttProvider::new(ctx)),
        ProviderId::GoogleCloudStt => Arc::new(GoogleSttProvider::new(ctx)),
        ProviderId::Deepgram => Arc::new(DeepgramProvider::new(ctx)),
        ProviderId::AwsTranscribe => Arc::new(AwsTranscribeProvider::with_aws_clients(&ctx)),
        ProviderId::OpenAiWhisper => Arc::new(WhisperProvider::new(ctx)),
        ProviderId::ElevenLabsStt => Arc::new(ElevenLabsSttProvider::new(ctx)),
        ProviderId::MurfFalcon => Arc::new(MurfFalconProvider::new(ctx)),
        _ => return None,
    };
    Some(adapter)
}

/// Cloud synthesis adapter for `id`
pub fn tts_adapter(id: ProviderId, ctx: &ProviderContext) -> Option<Arc<dyn TextToSpeech>> {
    let ctx = ctx.clone();
    let adapter: Arc<dyn TextToSpeech> = match id {
        ProviderId::AzureTts => Arc::new(AzureTtsProvider::new(ctx)),
        ProviderId::GoogleCloudTts => Arc::new(GoogleTtsProvider::new(ctx)),
        ProviderId::OpenAiTts => Arc::new(OpenAiTtsProvider::new(ctx)),
        ProviderId::ElevenLabsTts => Arc::new(ElevenLabsTtsProvider::new(ctx)),
        ProviderId::AmazonPolly => Arc::new(PollyProvider::new(ctx)),
        ProviderId::MurfTts => Arc::new(MurfTtsProvider::new(ctx)),
        _ => return None,
    };
    Some(adapter)
}

pub(crate) fn ensure_audio(audio: &AudioPayload) -> Result<(), TranscriptionError> {
    if audio.is_empty() {
        return Err(TranscriptionError::InvalidAudio("Audio data is empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use domain::{ProviderId, Stage};

    use super::*;

    #[test]
    fn every_implemented_provider_has_an_adapter() {
        let ctx = test_support::context(SpeechConfig::default(), &[]);
        for id in ProviderId::ALL {
            let descriptor = id.descriptor();
            let built = match id.stage() {
                Stage::Stt => stt_adapter(id, &ctx).map(|a| a.provider()),
                Stage::Tts => tts_adapter(id, &ctx).map(|a| a.provider()),
                Stage::Ai => None,
            };
            if descriptor.implemented && id.stage() != Stage::Ai {
                assert_eq!(built, Some(id), "{id} should have an adapter");
            } else {
                assert_eq!(built, None, "{id} should not have a speech adapter");
            }
        }
    }
}
