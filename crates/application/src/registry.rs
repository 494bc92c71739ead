//! Adapters available to the stage orchestrators, keyed by provider

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ai_core::ResponseGenerator;
use ai_speech::{SpeechToText, TextToSpeech};
use domain::ProviderId;
use secure_config::CredentialGate;

/// Cloud adapters plus the gate that decides whether they may be called
#[derive(Clone)]
pub struct ProviderRegistry {
    gate: CredentialGate,
    stt: HashMap<ProviderId, Arc<dyn SpeechToText>>,
    ai: HashMap<ProviderId, Arc<dyn ResponseGenerator>>,
    tts: HashMap<ProviderId, Arc<dyn TextToSpeech>>,
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self
            .stt
            .keys()
            .chain(self.ai.keys())
            .chain(self.tts.keys())
            .map(|id| id.name())
            .collect();
        ids.sort_unstable();
        f.debug_struct("ProviderRegistry")
            .field("adapters", &ids)
            .finish_non_exhaustive()
    }
}

impl ProviderRegistry {
    /// Empty registry; every provider falls through to local behavior
    pub fn new(gate: CredentialGate) -> Self {
        Self {
            gate,
            stt: HashMap::new(),
            ai: HashMap::new(),
            tts: HashMap::new(),
        }
    }

    pub fn register_stt(&mut self, adapter: Arc<dyn SpeechToText>) {
        self.stt.insert(adapter.provider(), adapter);
    }

    pub fn register_generator(&mut self, adapter: Arc<dyn ResponseGenerator>) {
        self.ai.insert(adapter.provider(), adapter);
    }

    pub fn register_tts(&mut self, adapter: Arc<dyn TextToSpeech>) {
        self.tts.insert(adapter.provider(), adapter);
    }

    #[must_use]
    pub fn with_stt(mut self, adapter: Arc<dyn SpeechToText>) -> Self {
        self.register_stt(adapter);
        self
    }

    #[must_use]
    pub fn with_generator(mut self, adapter: Arc<dyn ResponseGenerator>) -> Self {
        self.register_generator(adapter);
        self
    }

    #[must_use]
    pub fn with_tts(mut self, adapter: Arc<dyn TextToSpeech>) -> Self {
        self.register_tts(adapter);
        self
    }

    pub fn gate(&self) -> &CredentialGate {
        &self.gate
    }

    /// Whether `id` is implemented and has all of its keys
    pub fn is_ready(&self, id: ProviderId) -> bool {
        let descriptor = id.descriptor();
        descriptor.implemented && self.gate.is_available(descriptor)
    }

    /// Transcription adapter, only when the provider may be called
    pub fn stt(&self, id: ProviderId) -> Option<&Arc<dyn SpeechToText>> {
        self.stt.get(&id).filter(|_| self.is_ready(id))
    }

    /// Reply generator, only when the provider may be called
    pub fn generator(&self, id: ProviderId) -> Option<&Arc<dyn ResponseGenerator>> {
        self.ai.get(&id).filter(|_| self.is_ready(id))
    }

    /// Synthesis adapter, only when the provider may be called
    pub fn tts(&self, id: ProviderId) -> Option<&Arc<dyn TextToSpeech>> {
        self.tts.get(&id).filter(|_| self.is_ready(id))
    }

    /// Readiness note for `id`, used in canned replies and notices
    pub fn readiness_note(&self, id: ProviderId) -> String {
        self.gate.readiness_note(id.descriptor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gate, stt_mock};

    #[test]
    fn uncredentialed_adapter_is_hidden() {
        let registry = ProviderRegistry::new(gate(&[])).with_stt(Arc::new(stt_mock(ProviderId::Deepgram)));
        assert!(registry.stt(ProviderId::Deepgram).is_none());
        assert!(!registry.is_ready(ProviderId::Deepgram));
    }

    #[test]
    fn credentialed_adapter_is_returned() {
        let registry = ProviderRegistry::new(gate(&[("DEEPGRAM_API_KEY", "dg")]))
            .with_stt(Arc::new(stt_mock(ProviderId::Deepgram)));
        assert!(registry.stt(ProviderId::Deepgram).is_some());
        assert!(registry.stt(ProviderId::OpenAiWhisper).is_none());
    }

    #[test]
    fn unimplemented_provider_is_never_ready() {
        let registry = ProviderRegistry::new(gate(&[("WISPR_FLOW_API_KEY", "wf")]));
        assert!(!registry.is_ready(ProviderId::WisprFlow));
        assert!(registry.readiness_note(ProviderId::WisprFlow).contains("not implemented yet"));
    }

    #[test]
    fn debug_lists_registered_providers() {
        let registry = ProviderRegistry::new(gate(&[])).with_stt(Arc::new(stt_mock(ProviderId::Deepgram)));
        assert!(format!("{registry:?}").contains("Deepgram"));
    }
}
