//! Amazon Polly neural synthesis over the SigV4-signed REST API

use async_trait::async_trait;
use chrono::Utc;
use domain::ProviderId;
use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, instrument};

use super::ProviderContext;
use crate::aws::transcribe::service_error_message;
use crate::aws::{AwsCredentials, sign_request};
use crate::error::SynthesisError;
use crate::ports::TextToSpeech;
use crate::types::{SynthesisRequest, SynthesizedAudio};

const SERVICE: &str = "polly";

#[derive(Debug, Clone)]
pub struct PollyProvider {
    ctx: ProviderContext,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct SpeechRequest<'a> {
    output_format: &'a str,
    voice_id: &'a str,
    text: &'a str,
    engine: &'a str,
}

impl PollyProvider {
    pub fn new(ctx: ProviderContext) -> Self {
        Self { ctx }
    }

    fn url(&self, region: &str) -> Result<Url, SynthesisError> {
        let base = self.ctx.config().polly_endpoint.as_ref().map_or_else(
            || format!("https://polly.{region}.amazonaws.com"),
            |e| e.trim_end_matches('/').to_string(),
        );
        Url::parse(&format!("{base}/v1/speech"))
            .map_err(|e| SynthesisError::Configuration(format!("Invalid Polly endpoint: {e}")))
    }
}

#[async_trait]
impl TextToSpeech for PollyProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::AmazonPolly
    }

    #[instrument(skip(self, request), fields(text_len = request.text.len()))]
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio, SynthesisError> {
        let credentials = AwsCredentials::from_resolved(&self.ctx.credentials(self.provider())?);
        let url = self.url(&credentials.region)?;

        let payload = serde_json::to_vec(&SpeechRequest {
            output_format: "mp3",
            voice_id: &self.ctx.config().polly_voice_id,
            text: &request.text,
            engine: "neural",
        })
        .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        let signed = sign_request(
            &credentials,
            SERVICE,
            "POST",
            &url,
            &[("content-type", "application/json")],
            &payload,
            Utc::now(),
        )
        .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        let response = self
            .ctx
            .client()
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header("x-amz-date", signed.amz_date)
            .header("authorization", signed.authorization)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Http {
                provider: "Amazon Polly",
                status: status.as_u16(),
                detail: Some(service_error_message(&body)),
            });
        }

        let data = response.bytes().await?;
        debug!(bytes = data.len(), "Polly synthesis complete");
        Ok(SynthesizedAudio::mp3(data))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::SpeechConfig;
    use crate::providers::test_support::context;

    fn provider(mock_server: &MockServer) -> PollyProvider {
        let config = SpeechConfig {
            polly_endpoint: Some(mock_server.uri()),
            ..Default::default()
        };
        PollyProvider::new(context(
            config,
            &[
                ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
                ("AWS_SECRET_ACCESS_KEY", "secret"),
                ("AWS_REGION", "us-east-1"),
            ],
        ))
    }

    #[tokio::test]
    async fn posts_signed_neural_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/speech"))
            .and(header_exists("x-amz-date"))
            .and(header_exists("authorization"))
            .and(body_json(serde_json::json!({
                "OutputFormat": "mp3",
                "VoiceId": "Joanna",
                "Text": "Good evening",
                "Engine": "neural"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xF3]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let audio = provider(&mock_server)
            .synthesize(&SynthesisRequest::new("Good evening"))
            .await
            .unwrap();
        assert_eq!(audio.data().as_ref(), &[0xFF, 0xF3]);
    }

    #[tokio::test]
    async fn authorization_scopes_polly_in_region() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1]))
            .mount(&mock_server)
            .await;

        provider(&mock_server)
            .synthesize(&SynthesisRequest::new("Hi"))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(auth.contains("/us-east-1/polly/aws4_request"));
        assert!(auth.contains("SignedHeaders=content-type;host;x-amz-date"));
    }

    #[tokio::test]
    async fn service_error_message_is_detail() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({ "message": "The security token is invalid" })),
            )
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server)
            .synthesize(&SynthesisRequest::new("Hi"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Amazon Polly request failed (403): The security token is invalid"
        );
    }
}
