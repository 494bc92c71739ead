//! Azure Speech Services (short-audio REST recognition and SSML synthesis)

use async_trait::async_trait;
use domain::ProviderId;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{ProviderContext, ensure_audio};
use crate::error::{SynthesisError, TranscriptionError};
use crate::http::{ErrorBody, check_status, escape_xml};
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioPayload, SynthesisRequest, SynthesizedAudio, Transcription};

const SUBSCRIPTION_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OUTPUT_FORMAT: &str = "audio-16khz-32kbitrate-mono-mp3";

#[derive(Debug, Clone)]
pub struct AzureSttProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Clone)]
pub struct AzureTtsProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Deserialize)]
struct SimpleRecognition {
    #[serde(rename = "DisplayText", default)]
    display_text: String,
}

/// Endpoint override, or the regional host for `service` (`stt`/`tts`)
fn base_url(endpoint: Option<&String>, region: &str, service: &str) -> String {
    endpoint.map_or_else(
        || format!("https://{region}.{service}.speech.microsoft.com"),
        |e| e.trim_end_matches('/').to_string(),
    )
}

fn ssml(text: &str, language: &str, voice: &str) -> String {
    format!(
        "<speak version='1.0' xml:lang='{language}'><voice xml:lang='{language}' xml:gender='Female' name='{voice}'>{}</voice></speak>",
        escape_xml(text)
    )
}

impl AzureSttProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

impl AzureTtsProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SpeechToText for AzureSttProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::AzureStt
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let credentials = self.ctx.credentials(self.provider())?;
        ensure_audio(audio)?;
        let config = self.ctx.config();
        let base = base_url(
            config.azure_stt_endpoint.as_ref(),
            credentials.get("AZURE_STT_REGION"),
            "stt",
        );

        let response = self
            .ctx
            .client()
            .post(format!(
                "{base}/speech/recognition/conversation/cognitiveservices/v1"
            ))
            .query(&[("language", config.language.as_str()), ("format", "simple")])
            .header(SUBSCRIPTION_HEADER, credentials.get("AZURE_STT_KEY"))
            .header(CONTENT_TYPE, audio.content_type("audio/webm; codecs=opus"))
            .body(audio.bytes().clone())
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.transcription("Azure STT"))?;

        let body: SimpleRecognition = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        debug!(text_len = body.display_text.len(), "Azure transcription complete");
        Ok(Transcription::new(body.display_text))
    }
}

#[async_trait]
impl TextToSpeech for AzureTtsProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::AzureTts
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = self.ctx.credentials(self.provider())?;
        let config = self.ctx.config();
        let base = base_url(
            config.azure_tts_endpoint.as_ref(),
            credentials.get("AZURE_TTS_REGION"),
            "tts",
        );

        let response = self
            .ctx
            .client()
            .post(format!("{base}/cognitiveservices/v1"))
            .header(SUBSCRIPTION_HEADER, credentials.get("AZURE_TTS_KEY"))
            .header(CONTENT_TYPE, "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", OUTPUT_FORMAT)
            .body(ssml(&request.text, &config.language, &config.azure_tts_voice))
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.synthesis("Azure TTS"))?;

        Ok(SynthesizedAudio::mp3(response.bytes().await?))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::SpeechConfig;
    use crate::providers::test_support::context;

    fn test_context(mock_server: &MockServer) -> ProviderContext {
        let config = SpeechConfig {
            azure_stt_endpoint: Some(mock_server.uri()),
            azure_tts_endpoint: Some(format!("{}/", mock_server.uri())),
            ..Default::default()
        };
        context(
            config,
            &[
                ("AZURE_STT_KEY", "stt-key"),
                ("AZURE_STT_REGION", "westeurope"),
                ("AZURE_TTS_KEY", "tts-key"),
                ("AZURE_TTS_REGION", "westeurope"),
            ],
        )
    }

    #[test]
    fn regional_endpoints() {
        assert_eq!(
            base_url(None, "westeurope", "stt"),
            "https://westeurope.stt.speech.microsoft.com"
        );
        assert_eq!(
            base_url(None, "eastus", "tts"),
            "https://eastus.tts.speech.microsoft.com"
        );
    }

    #[test]
    fn ssml_escapes_text() {
        assert_eq!(
            ssml("a < b", "en-US", "en-US-JennyNeural"),
            "<speak version='1.0' xml:lang='en-US'><voice xml:lang='en-US' xml:gender='Female' name='en-US-JennyNeural'>a &lt; b</voice></speak>"
        );
    }

    #[tokio::test]
    async fn stt_reads_display_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech/recognition/conversation/cognitiveservices/v1"))
            .and(query_param("language", "en-US"))
            .and(query_param("format", "simple"))
            .and(header("Ocp-Apim-Subscription-Key", "stt-key"))
            .and(header("content-type", "audio/webm; codecs=opus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "RecognitionStatus": "Success",
                "DisplayText": "What time is it?"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = AzureSttProvider::new(test_context(&mock_server));
        let transcription = provider
            .transcribe(&AudioPayload::new(vec![1], ""))
            .await
            .unwrap();
        assert_eq!(transcription.text, "What time is it?");
    }

    #[tokio::test]
    async fn tts_posts_ssml() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/cognitiveservices/v1"))
            .and(header("Ocp-Apim-Subscription-Key", "tts-key"))
            .and(header("content-type", "application/ssml+xml"))
            .and(header("X-Microsoft-OutputFormat", OUTPUT_FORMAT))
            .and(body_string(ssml("Tom & Jerry", "en-US", "en-US-JennyNeural")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7, 7]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = AzureTtsProvider::new(test_context(&mock_server));
        let audio = provider
            .synthesize(&SynthesisRequest::new("Tom & Jerry"))
            .await
            .unwrap();
        assert_eq!(audio.data().as_ref(), &[7, 7]);
    }

    #[tokio::test]
    async fn tts_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let provider = AzureTtsProvider::new(test_context(&mock_server));
        let err = provider.synthesize(&SynthesisRequest::new("Hi")).await.unwrap_err();
        assert_eq!(err.to_string(), "Azure TTS request failed (401)");
    }
}
