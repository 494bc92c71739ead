//! Murf Falcon (voice changer with transcription) and Murf TTS

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::ProviderId;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{ProviderContext, ensure_audio};
use crate::error::{SynthesisError, TranscriptionError};
use crate::http::{ErrorBody, check_status};
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};

const AUTH_HEADER: &str = "api-key";

/// Transcribes through the voice changer's `return_transcription` option
#[derive(Debug, Clone)]
pub struct MurfFalconProvider {
    ctx: ProviderContext,
}

/// Generates speech, following an `audioFile` link when no inline audio is returned
#[derive(Debug, Clone)]
pub struct MurfTtsProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    transcription: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    encoded_audio: Option<String>,
    #[serde(default)]
    audio_file: Option<String>,
}

impl MurfFalconProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

impl MurfTtsProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    async fn download(&self, url: &str) -> Result<SynthesizedAudio, SynthesisError> {
        debug!("Fetching Murf audio file");
        let response = self.ctx.client().get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::MissingAudio(format!(
                "Unable to fetch Murf audio file ({})",
                status.as_u16()
            )));
        }
        Ok(SynthesizedAudio::mp3(response.bytes().await?))
    }
}

#[async_trait]
impl SpeechToText for MurfFalconProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::MurfFalcon
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
            .text("voice_id", config.murf_falcon_voice_id.clone())
            .text("return_transcription", "true");

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/voice-changer/convert", config.murf_base_url))
            .header(AUTH_HEADER, credentials.get("MURF_FALCON_API_KEY"))
            .multipart(form)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Murf)
            .await
            .map_err(|f| f.transcription("Murf Falcon STT"))?;

        let body: ConvertResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        Ok(Transcription::new(body.transcription.unwrap_or_default()))
    }
}

#[async_trait]
impl TextToSpeech for MurfTtsProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::MurfTts
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len(), voice = ?request.voice_id))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = self.ctx.credentials(self.provider())?;
        let config = self.ctx.config();

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/speech/generate", config.murf_base_url))
            .header(AUTH_HEADER, credentials.get("MURF_TTS_API_KEY"))
            .json(&GenerateRequest {
                text: &request.text,
                voice_id: request.voice_or(&config.murf_tts_voice_id),
                format: "MP3",
            })
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Murf)
            .await
            .map_err(|f| f.synthesis("Murf TTS"))?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        if let Some(encoded) = body.encoded_audio.filter(|a| !a.is_empty()) {
            let data = BASE64
                .decode(encoded)
                .map_err(|e| SynthesisError::InvalidResponse(format!("Invalid base64 audio: {e}")))?;
            return Ok(SynthesizedAudio::mp3(data));
        }

        match body.audio_file.filter(|url| !url.is_empty()) {
            Some(url) => self.download(&url).await,
            None => Err(SynthesisError::MissingAudio(
                "Murf TTS returned no audio file.".to_string(),
            )),
        }
    }
}
