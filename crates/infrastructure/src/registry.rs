//! Wiring of every cloud adapter into a [`ProviderRegistry`]

use ai_core::{GenerationError, generator_for};
use ai_speech::{ProviderContext, SetupError, stt_adapter, tts_adapter};
use application::ProviderRegistry;
use domain::{ProviderId, Stage};
use secure_config::CredentialGate;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppSettings;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Speech(#[from] SetupError),

    #[error(transparent)]
    Inference(#[from] GenerationError),
}

/// Register an adapter for every implemented provider.
///
/// Adapters are registered regardless of keys; the registry only hands out
/// those whose keys the gate finds.
pub fn build_registry(settings: &AppSettings, gate: CredentialGate) -> Result<ProviderRegistry, BuildError> {
    let ctx = ProviderContext::from_config(settings.speech.clone(), gate.clone())?;
    let mut registry = ProviderRegistry::new(gate.clone());

    for id in ProviderId::ALL {
        let wired = match id.stage() {
            Stage::Stt => stt_adapter(id, &ctx).map(|adapter| registry.register_stt(adapter)),
            Stage::Ai => generator_for(id, &settings.inference, &gate)?
                .map(|adapter| registry.register_generator(adapter)),
            Stage::Tts => tts_adapter(id, &ctx).map(|adapter| registry.register_tts(adapter)),
        }
        .is_some();
        debug!(provider = %id, wired, "Provider adapter");
    }

    info!(
        ready = ProviderId::ALL.iter().filter(|id| registry.is_ready(**id)).count(),
        "Provider registry built"
    );
    Ok(registry)
}
