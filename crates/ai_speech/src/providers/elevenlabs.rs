//! ElevenLabs speech-to-text (Scribe) and text-to-speech

use async_trait::async_trait;
use domain::ProviderId;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ProviderContext, ensure_audio};
use crate::error::{SynthesisError, TranscriptionError};
use crate::http::{ErrorBody, check_status};
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};

const API_KEY: &str = "ELEVENLABS_API_KEY";
const AUTH_HEADER: &str = "xi-api-key";

#[derive(Debug, Clone)]
pub struct ElevenLabsSttProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Clone)]
pub struct ElevenLabsTtsProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Deserialize)]
struct SttResponse {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsSttProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

impl ElevenLabsTtsProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SpeechToText for ElevenLabsSttProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::ElevenLabsStt
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let credentials = self.ctx.credentials(self.provider())?;
        ensure_audio(audio)?;
        let config = self.ctx.config();

        let file_part = Part::bytes(audio.bytes().to_vec())
            .file_name(audio.file_name())
            .mime_str(audio.content_type("audio/webm"))
            .map_err(|e| TranscriptionError::InvalidAudio(format!("Invalid MIME type: {e}")))?;
        let form = Form::new()
            .part("file", file_part)
            .text("model_id", config.elevenlabs_stt_model.clone())
            .text("language_code", config.language_code().to_string());

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/speech-to-text", config.elevenlabs_base_url))
            .header(AUTH_HEADER, credentials.get(API_KEY))
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.transcription("ElevenLabs STT"))?;

        let body: SttResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        debug!(text_len = body.text.len(), "ElevenLabs transcription complete");
        Ok(Transcription::new(body.text))
    }
}

#[async_trait]
impl TextToSpeech for ElevenLabsTtsProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::ElevenLabsTts
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len(), voice = ?request.voice_id))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = self.ctx.credentials(self.provider())?;
        let config = self.ctx.config();
        let voice_id = request.voice_or(&config.elevenlabs_voice_id);

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/text-to-speech/{voice_id}", config.elevenlabs_base_url))
            .header(AUTH_HEADER, credentials.get(API_KEY))
            .json(&TtsRequest {
                text: &request.text,
                model_id: &config.elevenlabs_tts_model,
            })
            .send()
            .await?;

        let response = check_status(response, ErrorBody::ElevenLabs)
            .await
            .map_err(|f| f.synthesis("ElevenLabs TTS"))?;

        Ok(SynthesizedAudio::mp3(response.bytes().await?))
    }
}
