//! Provider credential gating

use std::sync::Arc;

use domain::ProviderDescriptor;
use tracing::warn;

use crate::accessor::ConfigAccessor;
use crate::error::{CredentialError, CredentialMissingError};

/// Decides whether a provider has every configuration key it needs.
///
/// Evaluation is pure: it only reads configuration. A key whose value fails
/// to decrypt counts as missing here; adapters that resolve credentials for
/// a call see the decrypt error instead.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    accessor: Arc<ConfigAccessor>,
}

impl CredentialGate {
    pub fn new(accessor: Arc<ConfigAccessor>) -> Self {
        Self { accessor }
    }

    /// True iff the provider declares keys and all of them hold a non-blank value
    pub fn is_available(&self, descriptor: &ProviderDescriptor) -> bool {
        !descriptor.required_config_keys.is_empty() && self.missing_keys(descriptor).is_empty()
    }

    /// Required keys without a usable value, in descriptor order
    pub fn missing_keys(&self, descriptor: &ProviderDescriptor) -> Vec<&'static str> {
        descriptor
            .required_config_keys
            .iter()
            .copied()
            .filter(|key| !self.has_value(key))
            .collect()
    }

    /// Fail with the provider name and its missing keys unless available
    pub fn require(&self, descriptor: &ProviderDescriptor) -> Result<(), CredentialMissingError> {
        if self.is_available(descriptor) {
            Ok(())
        } else {
            Err(CredentialMissingError {
                provider: descriptor.name,
                missing: self.missing_keys(descriptor),
            })
        }
    }

    /// Read every required key for a call, propagating decrypt failures
    pub fn resolve(
        &self,
        descriptor: &ProviderDescriptor,
    ) -> Result<ResolvedCredentials, CredentialError> {
        let mut values = Vec::with_capacity(descriptor.required_config_keys.len());
        let mut missing = Vec::new();

        for key in descriptor.required_config_keys {
            match self.accessor.get_trimmed(key)? {
                Some(value) => values.push((*key, value)),
                None => missing.push(*key),
            }
        }

        if values.is_empty() || !missing.is_empty() {
            return Err(CredentialMissingError {
                provider: descriptor.name,
                missing,
            }
            .into());
        }

        Ok(ResolvedCredentials { values })
    }

    /// One-sentence readiness note used in canned replies and guidance
    pub fn readiness_note(&self, descriptor: &ProviderDescriptor) -> String {
        let name = descriptor.name;
        let missing = self.missing_keys(descriptor);
        if descriptor.required_config_keys.is_empty() {
            return format!("Add provider keys in the configuration to call {name}.");
        }
        if !missing.is_empty() {
            return format!("Add {} in the configuration to call {name}.", missing.join(", "));
        }

        if !descriptor.implemented {
            return format!(
                "{name} keys are loaded from the configuration, but the cloud adapter for it is not implemented yet."
            );
        }

        format!("{name} is ready with keys from the configuration.")
    }

    /// The accessor the gate reads through
    pub fn accessor(&self) -> &Arc<ConfigAccessor> {
        &self.accessor
    }

    fn has_value(&self, key: &str) -> bool {
        match self.accessor.get_trimmed(key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(error = %e, "Treating undecryptable credential as missing");
                false
            },
        }
    }
}

/// Trimmed credential values for one provider call.
///
/// Only produced when every required key resolved.
pub struct ResolvedCredentials {
    values: Vec<(&'static str, String)>,
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<_> = self.values.iter().map(|(k, _)| *k).collect();
        f.debug_struct("ResolvedCredentials")
            .field("keys", &keys)
            .finish_non_exhaustive()
    }
}

impl ResolvedCredentials {
    /// Value of a required key; empty if `key` is not one of the provider's keys
    pub fn get(&self, key: &str) -> &str {
        self.values
            .iter()
            .find(|(k, _)| *k == key)
            .map_or("", |(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use domain::{ProviderId, Stage};

    use super::*;
    use crate::cipher::ConfigCipher;
    use crate::error::CipherError;
    use crate::source::MapConfigSource;

    fn gate(source: MapConfigSource) -> CredentialGate {
        CredentialGate::new(Arc::new(ConfigAccessor::new(Arc::new(source))))
    }

    const KEYLESS: ProviderDescriptor = ProviderDescriptor {
        id: ProviderId::WisprFlow,
        name: "Keyless",
        stage: Stage::Stt,
        required_config_keys: &[],
        implemented: true,
        enable_key: "ENABLE_KEYLESS",
    };

    #[test]
    fn zero_key_descriptor_is_never_available() {
        let g = gate(MapConfigSource::new());
        assert!(!g.is_available(&KEYLESS));
        assert!(g.missing_keys(&KEYLESS).is_empty());
        assert_eq!(
            g.readiness_note(&KEYLESS),
            "Add provider keys in the configuration to call Keyless."
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let g = gate(
            MapConfigSource::new()
                .with("AZURE_STT_KEY", "key")
                .with("AZURE_STT_REGION", "  "),
        );
        let azure = ProviderId::AzureStt.descriptor();
        assert!(!g.is_available(azure));
        assert_eq!(g.missing_keys(azure), vec!["AZURE_STT_REGION"]);

        let err = g.require(azure).unwrap_err();
        assert_eq!(err.provider, "Azure Speech-to-Text");
        assert_eq!(err.missing, vec!["AZURE_STT_REGION"]);
    }

    #[test]
    fn undecryptable_values_count_as_missing() {
        let g = gate(MapConfigSource::from_iter([("OPENAI_API_KEY", "enc:v1:bogus")]));
        let openai = ProviderId::OpenAiApi.descriptor();
        assert!(!g.is_available(openai));
        assert_eq!(g.missing_keys(openai), vec!["OPENAI_API_KEY"]);
    }

    #[test]
    fn resolve_propagates_decrypt_errors() {
        let g = gate(MapConfigSource::from_iter([("OPENAI_API_KEY", "enc:v1:")]));
        match g.resolve(ProviderId::OpenAiTts.descriptor()) {
            Err(CredentialError::Decrypt(e)) => assert_eq!(e.reason, CipherError::Empty),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn resolve_returns_trimmed_values() {
        let sealed = ConfigCipher::with_fallback_key().encrypt(" secret ").unwrap();
        let g = gate(
            MapConfigSource::new()
                .with("AWS_ACCESS_KEY_ID", "AKID")
                .with("AWS_SECRET_ACCESS_KEY", sealed)
                .with("AWS_REGION", "eu-west-1 "),
        );
        let creds = g.resolve(ProviderId::AmazonPolly.descriptor()).unwrap();
        assert_eq!(creds.get("AWS_SECRET_ACCESS_KEY"), "secret");
        assert_eq!(creds.get("AWS_REGION"), "eu-west-1");
        assert_eq!(creds.get("UNRELATED"), "");
        assert!(!format!("{creds:?}").contains("secret\""));
    }

    #[test]
    fn readiness_notes() {
        let g = gate(
            MapConfigSource::new()
                .with("GEMINI_API_KEY", "gm")
                .with("WISPR_FLOW_API_KEY", "wf"),
        );
        assert_eq!(
            g.readiness_note(ProviderId::Gemini.descriptor()),
            "Gemini is ready with keys from the configuration."
        );
        assert_eq!(
            g.readiness_note(ProviderId::WisprFlow.descriptor()),
            "Wispr Flow keys are loaded from the configuration, but the cloud adapter for it is not implemented yet."
        );
        assert_eq!(
            g.readiness_note(ProviderId::AzureTts.descriptor()),
            "Add AZURE_TTS_KEY, AZURE_TTS_REGION in the configuration to call Azure Text-to-Speech."
        );
    }

    #[test]
    fn readiness_note_names_only_missing_keys() {
        let g = gate(MapConfigSource::from_iter([("AZURE_STT_KEY", "key")]));
        let azure = ProviderId::AzureStt.descriptor();

        assert_eq!(
            g.readiness_note(azure),
            "Add AZURE_STT_REGION in the configuration to call Azure Speech-to-Text."
        );
    }
}
