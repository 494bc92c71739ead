//! Port definitions for response generation

use async_trait::async_trait;
use domain::ProviderId;
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// What the AI stage is asked to answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The user's transcript
    pub prompt: String,
    /// Display name to address the user by
    pub user_name: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            user_name: user_name.into(),
        }
    }
}

/// Reply text as returned by the provider, trimmed; may be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedReply {
    pub text: String,
}

impl GeneratedReply {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Port for reply generation
///
/// # Example
///
/// ```ignore
/// use ai_core::{GenerationRequest, ResponseGenerator};
///
/// let reply = generator
///     .generate(&GenerationRequest::new("What's the weather?", "Guest"))
///     .await?;
/// println!("{}", reply.text);
/// ```
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    /// Catalog entry this adapter serves
    fn provider(&self) -> ProviderId;

    /// Generate a reply to one prompt
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` on missing credentials, transport failures
    /// or non-success statuses.
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedReply, GenerationError>;
}
