//! OpenAI Speech Providers
//!
//! Implements `SpeechToText` using OpenAI Whisper and `TextToSpeech` using
//! OpenAI TTS. Both authenticate with `OPENAI_API_KEY` as a bearer token.

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

const API_KEY: &str = "OPENAI_API_KEY";

/// Whisper transcription adapter
#[derive(Debug, Clone)]
pub struct WhisperProvider {
    ctx: ProviderContext,
}

/// OpenAI TTS adapter
#[derive(Debug, Clone)]
pub struct OpenAiTtsProvider {
    ctx: ProviderContext,
}

/// OpenAI Whisper transcription response
#[derive(Debug, Deserialize)]
struct WhisperResponse {
    #[serde(default)]
    text: String,
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    format: &'a str,
}

impl WhisperProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn url(&self) -> String {
        format!("{}/audio/transcriptions", self.ctx.config().openai_base_url)
    }
}

impl OpenAiTtsProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn url(&self) -> String {
        format!("{}/audio/speech", self.ctx.config().openai_base_url)
    }
}

#[async_trait]
impl SpeechToText for WhisperProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAiWhisper
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len(), format = ?audio.format()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let credentials = self.ctx.credentials(self.provider())?;
        ensure_audio(audio)?;
        debug!("Transcribing audio with OpenAI Whisper");

        let file_part = Part::bytes(audio.bytes().to_vec())
            .file_name(audio.file_name())
            .mime_str(audio.content_type(audio.format().mime_type()))
            .map_err(|e| TranscriptionError::InvalidAudio(format!("Invalid MIME type: {e}")))?;

        let form = Form::new()
            .part("file", file_part)
            .text("model", self.ctx.config().whisper_model.clone());

        let response = self
            .ctx
            .client()
            .post(self.url())
            .bearer_auth(credentials.get(API_KEY))
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.transcription("OpenAI Whisper"))?;

        let whisper_response: WhisperResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        debug!(text_len = whisper_response.text.len(), "Transcription complete");
        Ok(Transcription::new(whisper_response.text))
    }
}

#[async_trait]
impl TextToSpeech for OpenAiTtsProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAiTts
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = self.ctx.credentials(self.provider())?;
        let config = self.ctx.config();
        debug!("Synthesizing speech with OpenAI TTS");

        let body = TtsRequest {
            model: &config.openai_tts_model,
            voice: request.voice_or(&config.openai_tts_voice),
            input: &request.text,
            format: "mp3",
        };

        let response = self
            .ctx
            .client()
            .post(self.url())
            .bearer_auth(credentials.get(API_KEY))
            .json(&body)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.synthesis("OpenAI TTS"))?;

        Ok(SynthesizedAudio::mp3(response.bytes().await?))
    }
}
