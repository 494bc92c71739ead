//! Response orchestrator - Cloud reply or canned echo

use std::sync::Arc;

use ai_core::GenerationRequest;
use domain::{ProviderId, TurnSource};
use tracing::{debug, info, instrument};

use super::transcription::StageOutput;
use crate::error::PipelineError;
use crate::registry::ProviderRegistry;

/// Deterministic reply used when the AI provider cannot be called
pub fn canned_reply(user_name: &str, transcript: &str, guidance: &str) -> String {
    format!("Hi {user_name}! I heard: \"{transcript}\". {guidance}")
}

/// Produces the assistant reply for a transcript
#[derive(Debug, Clone)]
pub struct ResponseOrchestrator {
    registry: Arc<ProviderRegistry>,
}

impl ResponseOrchestrator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Reply to `transcript` through `provider`.
    ///
    /// The source is always the provider, canned replies included. Adapter
    /// failures propagate.
    #[instrument(skip(self, transcript), fields(provider = %provider))]
    pub async fn respond(
        &self,
        provider: ProviderId,
        transcript: &str,
        user_name: &str,
    ) -> Result<StageOutput, PipelineError> {
        let source = TurnSource::Provider(provider);

        let Some(generator) = self.registry.generator(provider) else {
            info!("Provider not callable, using canned reply");
            return Ok(StageOutput {
                text: canned_reply(user_name, transcript, &self.registry.readiness_note(provider)),
                source,
                notice: None,
            });
        };

        let reply = generator
            .generate(&GenerationRequest::new(transcript, user_name))
            .await?;
        let text = if reply.is_empty() {
            format!("No response from {}.", provider.name())
        } else {
            reply.text
        };

        debug!(chars = text.len(), "Reply ready");
        Ok(StageOutput {
            text,
            source,
            notice: None,
        })
    }
}
