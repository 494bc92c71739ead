//! Closed set of providers the pipeline can route to

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{CATALOG, ProviderDescriptor};
use crate::errors::DomainError;
use crate::value_objects::Stage;

/// Every provider known to the pipeline, across all three stages
///
/// Serialized by display name so stored preferences stay human readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProviderId {
    #[serde(rename = "Azure Speech-to-Text")]
    AzureStt,
    #[serde(rename = "Google Cloud STT")]
    GoogleCloudStt,
    #[serde(rename = "Deepgram")]
    Deepgram,
    #[serde(rename = "AWS Transcribe")]
    AwsTranscribe,
    #[serde(rename = "OpenAI Whisper API")]
    OpenAiWhisper,
    #[serde(rename = "ElevenLabs STT")]
    ElevenLabsStt,
    #[serde(rename = "Wispr Flow")]
    WisprFlow,
    #[serde(rename = "Murf Falcon")]
    MurfFalcon,
    #[serde(rename = "OpenAI API")]
    OpenAiApi,
    #[serde(rename = "Gemini")]
    Gemini,
    #[serde(rename = "Azure Text-to-Speech")]
    AzureTts,
    #[serde(rename = "Google Cloud TTS")]
    GoogleCloudTts,
    #[serde(rename = "OpenAI TTS")]
    OpenAiTts,
    #[serde(rename = "ElevenLabs TTS")]
    ElevenLabsTts,
    #[serde(rename = "Amazon Polly")]
    AmazonPolly,
    #[serde(rename = "Murf TTS")]
    MurfTts,
}

impl ProviderId {
    /// All providers, in catalog order
    pub const ALL: [Self; 16] = [
        Self::AzureStt,
        Self::GoogleCloudStt,
        Self::Deepgram,
        Self::AwsTranscribe,
        Self::OpenAiWhisper,
        Self::ElevenLabsStt,
        Self::WisprFlow,
        Self::MurfFalcon,
        Self::OpenAiApi,
        Self::Gemini,
        Self::AzureTts,
        Self::GoogleCloudTts,
        Self::OpenAiTts,
        Self::ElevenLabsTts,
        Self::AmazonPolly,
        Self::MurfTts,
    ];

    /// Static catalog entry for this provider
    #[must_use]
    pub fn descriptor(self) -> &'static ProviderDescriptor {
        &CATALOG[self as usize]
    }

    /// Human-readable provider name
    #[must_use]
    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Stage this provider serves
    #[must_use]
    pub fn stage(self) -> Stage {
        self.descriptor().stage
    }

    /// Whether transcription runs as an upload + batch job instead of a single call.
    ///
    /// Such providers never substitute the local transcript on failure.
    #[must_use]
    pub const fn is_batch_job(self) -> bool {
        matches!(self, Self::AwsTranscribe)
    }

    /// Providers serving `stage`, in catalog order
    pub fn for_stage(stage: Stage) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |id| id.stage() == stage)
    }

    /// Look up a provider by display name (case-insensitive)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim();
        Self::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| DomainError::UnknownProvider(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_indexed_by_variant() {
        for id in ProviderId::ALL {
            assert_eq!(id.descriptor().id, id);
        }
    }

    #[test]
    fn stage_partition_matches_catalog() {
        assert_eq!(ProviderId::for_stage(Stage::Stt).count(), 8);
        assert_eq!(ProviderId::for_stage(Stage::Ai).count(), 2);
        assert_eq!(ProviderId::for_stage(Stage::Tts).count(), 6);
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            ProviderId::from_name("openai whisper api"),
            Some(ProviderId::OpenAiWhisper)
        );
        assert_eq!(ProviderId::from_name(" Murf TTS "), Some(ProviderId::MurfTts));
        assert_eq!(ProviderId::from_name("Acme"), None);
    }

    #[test]
    fn from_str_reports_unknown_names() {
        let err = "Acme".parse::<ProviderId>().unwrap_err();
        assert_eq!(err, DomainError::UnknownProvider("Acme".to_string()));
    }

    #[test]
    fn serializes_by_display_name() {
        let json = serde_json::to_string(&ProviderId::AmazonPolly).unwrap();
        assert_eq!(json, "\"Amazon Polly\"");
        let parsed: ProviderId = serde_json::from_str("\"Google Cloud STT\"").unwrap();
        assert_eq!(parsed, ProviderId::GoogleCloudStt);
    }

    #[test]
    fn only_aws_transcribe_is_a_batch_job() {
        let batch: Vec<_> = ProviderId::ALL
            .into_iter()
            .filter(|id| id.is_batch_job())
            .collect();
        assert_eq!(batch, vec![ProviderId::AwsTranscribe]);
    }
}
