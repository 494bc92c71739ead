//! Google Gemini `generateContent` adapter

use async_trait::async_trait;
use domain::ProviderId;
use reqwest::Client;
use secure_config::CredentialGate;
use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::GenerationError;
use crate::ports::{GeneratedReply, GenerationRequest, ResponseGenerator};
use crate::{build_client, text_at};

const LABEL: &str = "Gemini";

#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    config: InferenceConfig,
    gate: CredentialGate,
}

impl GeminiProvider {
    pub fn new(config: InferenceConfig, gate: CredentialGate) -> Result<Self, GenerationError> {
        let client = build_client(&config)?;
        Ok(Self { client, config, gate })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.gemini_base_url.trim_end_matches('/'),
            self.config.gemini_model
        )
    }
}

#[async_trait]
impl ResponseGenerator for GeminiProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::Gemini
    }

    #[instrument(skip(self, request), fields(model = %self.config.gemini_model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedReply, GenerationError> {
        let credentials = self.gate.resolve(self.provider().descriptor())?;

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": format!("User: {}\nPrompt: {}", request.user_name, request.prompt) }]
            }]
        });

        let response = self
            .client
            .post(self.url())
            .query(&[("key", credentials.get("GEMINI_API_KEY"))])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Gemini generation failed");
            return Err(GenerationError::Http {
                provider: LABEL,
                status: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        let reply = GeneratedReply::new(text_at(&value, "/candidates/0/content/parts/0/text"));
        debug!(reply_len = reply.text.len(), "Gemini reply received");
        Ok(reply)
    }
}
