//! Deepgram pre-recorded transcription

use async_trait::async_trait;
use domain::ProviderId;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, instrument};

use super::{ProviderContext, ensure_audio};
use crate::error::TranscriptionError;
use crate::http::{ErrorBody, check_status, text_at};
use crate::ports::SpeechToText;
use crate::types::{AudioPayload, Transcription};

const API_KEY: &str = "DEEPGRAM_API_KEY";

/// Sends the raw recording body to `/v1/listen`
#[derive(Debug, Clone)]
pub struct DeepgramProvider {
    ctx: ProviderContext,
}

impl DeepgramProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl SpeechToText for DeepgramProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::Deepgram
    }

    #[instrument(skip(self, audio), fields(audio_size = audio.len()))]
    async fn transcribe(&self, audio: &AudioPayload) -> Result<Transcription, TranscriptionError> {
        let credentials = self.ctx.credentials(self.provider())?;
        ensure_audio(audio)?;
        let config = self.ctx.config();

        let response = self
            .ctx
            .client()
            .post(format!("{}/v1/listen", config.deepgram_base_url))
            .query(&[("model", config.deepgram_model.as_str()), ("smart_format", "true")])
            .header("authorization", format!("Token {}", credentials.get(API_KEY)))
            .header(CONTENT_TYPE, audio.content_type("audio/webm"))
            .body(audio.bytes().clone())
            .send()
            .await?;

        let response = check_status(response, ErrorBody::Ignored)
            .await
            .map_err(|f| f.transcription("Deepgram"))?;

        let value: Value = response
            .json()
            .await
            .map_err(|e| TranscriptionError::InvalidResponse(e.to_string()))?;
        let text = text_at(&value, "/results/channels/0/alternatives/0/transcript");

        debug!(text_len = text.len(), "Deepgram transcription complete");
        Ok(Transcription::new(text))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_bytes, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::SpeechConfig;
    use crate::providers::test_support::context;

    fn provider(mock_server: &MockServer) -> DeepgramProvider {
        let config = SpeechConfig {
            deepgram_base_url: mock_server.uri(),
            ..Default::default()
        };
        DeepgramProvider::new(context(config, &[(API_KEY, "dg-key")]))
    }

    #[tokio::test]
    async fn sends_raw_body_with_token_auth() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/listen"))
            .and(query_param("model", "nova-2"))
            .and(query_param("smart_format", "true"))
            .and(header("authorization", "Token dg-key"))
            .and(header("content-type", "audio/ogg"))
            .and(body_bytes(vec![9, 8, 7]))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": { "channels": [ { "alternatives": [ { "transcript": "turn on the lights " } ] } ] }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transcription = provider(&mock_server)
            .transcribe(&AudioPayload::new(vec![9, 8, 7], "audio/ogg"))
            .await
            .unwrap();
        assert_eq!(transcription.text, "turn on the lights");
    }

    #[tokio::test]
    async fn missing_hint_defaults_to_webm() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("content-type", "audio/webm"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "results": {} })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let transcription = provider(&mock_server)
            .transcribe(&AudioPayload::new(vec![1], ""))
            .await
            .unwrap();
        assert!(transcription.is_empty());
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server)
            .transcribe(&AudioPayload::new(vec![1], ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Deepgram request failed (503)");
    }
}
