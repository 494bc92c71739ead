//! Google Cloud Speech-to-Text and Text-to-Speech (API key auth)

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use domain::ProviderId;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use super::{ProviderContext, ensure_audio};
use crate::error::{SynthesisError, TranscriptionError};
use crate::http::{ErrorBody, check_status};
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioFormat, AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};

const STT_API_KEY: &str = "GOOGLE_CLOUD_STT_API_KEY";
const TTS_API_KEY: &str = "GOOGLE_CLOUD_TTS_API_KEY";

#[derive(Debug, Clone)]
pub struct GoogleSttProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Clone)]
pub struct GoogleTtsProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognitionResult>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: Option<String>,
}

/// Recognition encoding for a container format
const fn encoding(format: AudioFormat) -> &'static str {
    match format {
        AudioFormat::Webm | AudioFormat::Mp4 => "WEBM_OPUS",
        AudioFormat::Ogg => "OGG_OPUS",
        AudioFormat::Wav => "LINEAR16",
        AudioFormat::Mp3 => "MP3",
        AudioFormat::Flac => "FLAC",
    }
}

impl GoogleSttProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

impl GoogleTtsProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SpeechToText for GoogleSttProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::GoogleCloudStt
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let credentials = self.ctx.credentials(self.provider())?;
        ensure_audio(audio)?;
        let config = self.ctx.config();

        let body = json!({
            "config": {
                "encoding": encoding(audio.format()),
                "languageCode": config.language,
                "enableAutomaticPunctuation": true,
            },
            "audio": { "content": BASE64.encode(audio.bytes()) },
        });

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/speech:recognize", config.google_stt_base_url))
            .query(&[("key", credentials.get(STT_API_KEY))])
            .json(&body)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.transcription("Google Cloud STT"))?;

        let parsed: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .results
            .iter()
            .map(|r| r.alternatives.first().map_or("", |a| a.transcript.as_str()))
            .collect::<Vec<_>>()
            .join(" ");

        debug!(results = parsed.results.len(), "Google transcription complete");
        Ok(Transcription::new(text))
    }
}

#[async_trait]
impl TextToSpeech for GoogleTtsProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::GoogleCloudTts
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = self.ctx.credentials(self.provider())?;
        let config = self.ctx.config();

        let body = json!({
            "input": { "text": request.text },
            "voice": { "languageCode": config.language, "ssmlGender": "NEUTRAL" },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/text:synthesize", config.google_tts_base_url))
            .query(&[("key", credentials.get(TTS_API_KEY))])
            .json(&body)
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.synthesis("Google Cloud TTS"))?;

        let parsed: SynthesizeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;

        let encoded = parsed
            .audio_content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| SynthesisError::MissingAudio("Google Cloud TTS returned no audio.".to_string()))?;

        let data = BASE64
            .decode(encoded)
            .map_err(|e| SynthesisError::InvalidResponse(format!("Invalid base64 audio: {e}")))?;
        Ok(SynthesizedAudio::mp3(data))
    }
}
