//! OpenAI chat completions adapter

use async_trait::async_trait;
use domain::ProviderId;
use reqwest::Client;
use secure_config::CredentialGate;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::GenerationError;
use crate::ports::{GeneratedReply, GenerationRequest, ResponseGenerator};
use crate::{build_client, text_at};

const LABEL: &str = "OpenAI API";

/// Replies through `/chat/completions` with a fixed system prompt
#[derive(Debug, Clone)]
pub struct OpenAiChatProvider {
    client: Client,
    config: InferenceConfig,
    gate: CredentialGate,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: std::borrow::Cow<'a, str>,
}

impl OpenAiChatProvider {
    /// Create a new adapter
    pub fn new(config: InferenceConfig, gate: CredentialGate) -> Result<Self, GenerationError> {
        let client = build_client(&config)?;
        Ok(Self { client, config, gate })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.config.openai_base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiChatProvider {
    fn provider(&self) -> ProviderId {
        ProviderId::OpenAiApi
    }

    #[instrument(skip(self, request), fields(model = %self.config.openai_model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedReply, GenerationError> {
        let credentials = self.gate.resolve(self.provider().descriptor())?;

        let body = ChatRequest {
            model: &self.config.openai_model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: self.config.system_prompt.as_str().into(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("User name: {}\nPrompt: {}", request.user_name, request.prompt).into(),
                },
            ],
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(credentials.get("OPENAI_API_KEY"))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Chat completion failed");
            return Err(GenerationError::Http {
                provider: LABEL,
                status: status.as_u16(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;
        let reply = GeneratedReply::new(text_at(&value, "/choices/0/message/content"));
        debug!(reply_len = reply.text.len(), "Chat completion received");
        Ok(reply)
    }
}
