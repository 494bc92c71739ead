//! Synthesis orchestrator - Cloud TTS with a local voice that cannot fail

use std::sync::Arc;

use ai_speech::{SynthesisError, SynthesisRequest, SynthesizedAudio};
use domain::ProviderId;
use tracing::{info, instrument, warn};

use crate::ports::{AudioSink, LocalVoice};
use crate::registry::ProviderRegistry;

/// How the reply was voiced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Cloud audio played to completion
    pub rendered: bool,
    /// Set whenever the local voice stood in
    pub notice: Option<String>,
}

pub struct SynthesisOrchestrator {
    registry: Arc<ProviderRegistry>,
    sink: Arc<dyn AudioSink>,
    voice: Arc<dyn LocalVoice>,
}

impl std::fmt::Debug for SynthesisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynthesisOrchestrator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl SynthesisOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>, sink: Arc<dyn AudioSink>, voice: Arc<dyn LocalVoice>) -> Self {
        Self {
            registry,
            sink,
            voice,
        }
    }

    /// Speak `text` through `provider`, or the local voice when that fails
    #[instrument(skip(self, text), fields(provider = %provider, text_len = text.len()))]
    pub async fn speak(&self, provider: ProviderId, text: &str, voice_id: Option<&str>) -> SynthesisOutcome {
        let Some(adapter) = self.registry.tts(provider) else {
            info!("Provider not callable, using local voice");
            self.voice.speak(text).await;
            return SynthesisOutcome {
                rendered: false,
                notice: Some(format!(
                    "{} Played local speech fallback.",
                    self.registry.readiness_note(provider)
                )),
            };
        };

        let request = SynthesisRequest::new(text).with_voice(voice_id);
        match self.render(adapter.synthesize(&request).await).await {
            Ok(()) => SynthesisOutcome {
                rendered: true,
                notice: None,
            },
            Err(err) => {
                warn!(error = %err, "Cloud TTS failed, using local voice");
                self.voice.speak(text).await;
                SynthesisOutcome {
                    rendered: false,
                    notice: Some(format!("Cloud TTS failed ({err}). Played local speech fallback.")),
                }
            },
        }
    }

    async fn render(
        &self,
        audio: Result<SynthesizedAudio, SynthesisError>,
    ) -> Result<(), SynthesisError> {
        let audio = audio?;
        if audio.is_empty() {
            return Err(SynthesisError::MissingAudio("Provider returned empty audio.".to_string()));
        }
        self.sink.play(&audio).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockAudioSink, MockLocalVoice};
    use crate::test_support::{MockTts, gate, tts_mock};

    const ELEVEN_KEY: (&str, &str) = ("ELEVENLABS_API_KEY", "xi");

    fn orchestrator(
        keys: &[(&str, &str)],
        tts: MockTts,
        sink: MockAudioSink,
        voice: MockLocalVoice,
    ) -> SynthesisOrchestrator {
        let registry = ProviderRegistry::new(gate(keys)).with_tts(Arc::new(tts));
        SynthesisOrchestrator::new(Arc::new(registry), Arc::new(sink), Arc::new(voice))
    }

    #[tokio::test]
    async fn cloud_audio_is_played() {
        let mut tts = tts_mock(ProviderId::ElevenLabsTts);
        tts.expect_synthesize()
            .withf(|request| request.text == "Hello" && request.voice_id.as_deref() == Some("custom-voice"))
            .times(1)
            .returning(|_| Ok(SynthesizedAudio::mp3(vec![1, 2, 3])));
        let mut sink = MockAudioSink::new();
        sink.expect_play().times(1).returning(|_| Ok(()));
        let mut voice = MockLocalVoice::new();
        voice.expect_speak().never();

        let outcome = orchestrator(&[ELEVEN_KEY], tts, sink, voice)
            .speak(ProviderId::ElevenLabsTts, "Hello", Some("custom-voice"))
            .await;
        assert!(outcome.rendered);
        assert!(outcome.notice.is_none());
    }

    #[tokio::test]
    async fn http_failure_uses_local_voice_once() {
        let mut tts = tts_mock(ProviderId::ElevenLabsTts);
        tts.expect_synthesize().returning(|_| {
            Err(SynthesisError::Http {
                provider: "ElevenLabs TTS",
                status: 401,
                detail: Some("Invalid API key".to_string()),
            })
        });
        let mut sink = MockAudioSink::new();
        sink.expect_play().never();
        let mut voice = MockLocalVoice::new();
        voice.expect_speak().withf(|text| text == "Hello").times(1).return_const(());

        let outcome = orchestrator(&[ELEVEN_KEY], tts, sink, voice)
            .speak(ProviderId::ElevenLabsTts, "Hello", None)
            .await;
        assert!(!outcome.rendered);
        assert_eq!(
            outcome.notice.as_deref(),
            Some("Cloud TTS failed (ElevenLabs TTS request failed (401): Invalid API key). Played local speech fallback.")
        );
    }

    #[tokio::test]
    async fn playback_failure_uses_local_voice() {
        let mut tts = tts_mock(ProviderId::ElevenLabsTts);
        tts.expect_synthesize()
            .returning(|_| Ok(SynthesizedAudio::mp3(vec![9])));
        let mut sink = MockAudioSink::new();
        sink.expect_play()
            .returning(|_| Err(SynthesisError::Playback("device busy".to_string())));
        let mut voice = MockLocalVoice::new();
        voice.expect_speak().times(1).return_const(());

        let outcome = orchestrator(&[ELEVEN_KEY], tts, sink, voice)
            .speak(ProviderId::ElevenLabsTts, "Hello", None)
            .await;
        assert!(!outcome.rendered);
        assert!(outcome.notice.unwrap().contains("Audio playback failed: device busy"));
    }

    #[tokio::test]
    async fn uncallable_provider_speaks_locally_with_reason() {
        let mut tts = tts_mock(ProviderId::ElevenLabsTts);
        tts.expect_synthesize().never();
        let mut sink = MockAudioSink::new();
        sink.expect_play().never();
        let mut voice = MockLocalVoice::new();
        voice.expect_speak().times(1).return_const(());

        let outcome = orchestrator(&[], tts, sink, voice)
            .speak(ProviderId::ElevenLabsTts, "Hello", None)
            .await;
        assert!(!outcome.rendered);
        assert_eq!(
            outcome.notice.as_deref(),
            Some("Add ELEVENLABS_API_KEY in the configuration to call ElevenLabs TTS. Played local speech fallback.")
        );
    }
}
