//! AI Core - Response generation
//!
//! Provides the `ResponseGenerator` port and the two cloud adapters behind
//! the AI stage: OpenAI chat completions and Google Gemini.

pub mod config;
pub mod error;
pub mod gemini;
pub mod openai;
pub mod ports;

use std::sync::Arc;
use std::time::Duration;

use domain::ProviderId;
use reqwest::Client;
use secure_config::CredentialGate;

pub use config::InferenceConfig;
pub use error::GenerationError;
pub use gemini::GeminiProvider;
pub use openai::OpenAiChatProvider;
pub use ports::{GeneratedReply, GenerationRequest, ResponseGenerator};

/// Adapter for an AI-stage provider; `None` for providers of other stages
pub fn generator_for(
    id: ProviderId,
    config: &InferenceConfig,
    gate: &CredentialGate,
) -> Result<Option<Arc<dyn ResponseGenerator>>, GenerationError> {
    Ok(match id {
        ProviderId::OpenAiApi => Some(Arc::new(OpenAiChatProvider::new(config.clone(), gate.clone())?)),
        ProviderId::Gemini => Some(Arc::new(GeminiProvider::new(config.clone(), gate.clone())?)),
        _ => None,
    })
}

/// Validate `config` and build a client honouring its timeout
pub(crate) fn build_client(config: &InferenceConfig) -> Result<Client, GenerationError> {
    config.validate().map_err(GenerationError::Configuration)?;
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .build()
        .map_err(|e| GenerationError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Trimmed string at a JSON pointer, empty when absent
pub(crate) fn text_at(value: &serde_json::Value, pointer: &str) -> String {
    value
        .pointer(pointer)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}
