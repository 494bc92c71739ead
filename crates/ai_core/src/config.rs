//! Configuration for response generation

use serde::{Deserialize, Serialize};

/// Configuration for the AI-stage adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Chat completion model
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Gemini API base URL
    #[serde(default = "default_gemini_base_url")]
    pub gemini_base_url: String,

    /// Gemini model
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// System prompt sent with chat completions
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.5-pro".to_string()
}

fn default_system_prompt() -> String {
    "You are a helpful assistant for a multi-service voice chatbot demo.".to_string()
}

const fn default_timeout_ms() -> u64 {
    60000 // 60 seconds
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            openai_base_url: default_openai_base_url(),
            openai_model: default_openai_model(),
            gemini_base_url: default_gemini_base_url(),
            gemini_model: default_gemini_model(),
            system_prompt: default_system_prompt(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl InferenceConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        if self.openai_model.trim().is_empty() || self.gemini_model.trim().is_empty() {
            return Err("Model names must not be empty".to_string());
        }
        Ok(())
    }
}
