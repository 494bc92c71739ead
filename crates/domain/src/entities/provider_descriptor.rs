//! Static provider catalog

use serde::Serialize;

use crate::value_objects::{ProviderId, Stage};

/// Static description of one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProviderDescriptor {
    /// Catalog key
    pub id: ProviderId,
    /// Display name
    pub name: &'static str,
    /// Stage served
    pub stage: Stage,
    /// Configuration keys that must all be present, in reporting order
    pub required_config_keys: &'static [&'static str],
    /// Whether a cloud adapter exists for this provider
    pub implemented: bool,
    /// Feature-flag key that can switch this provider off
    pub enable_key: &'static str,
}

const fn entry(
    id: ProviderId,
    name: &'static str,
    stage: Stage,
    required_config_keys: &'static [&'static str],
    implemented: bool,
    enable_key: &'static str,
) -> ProviderDescriptor {
    ProviderDescriptor {
        id,
        name,
        stage,
        required_config_keys,
        implemented,
        enable_key,
    }
}

/// Provider catalog, indexed by `ProviderId as usize`
pub static CATALOG: [ProviderDescriptor; 16] = [
    entry(
        ProviderId::AzureStt,
        "Azure Speech-to-Text",
        Stage::Stt,
        &["AZURE_STT_KEY", "AZURE_STT_REGION"],
        true,
        "ENABLE_AZURE_STT",
    ),
    entry(
        ProviderId::GoogleCloudStt,
        "Google Cloud STT",
        Stage::Stt,
        &["GOOGLE_CLOUD_STT_API_KEY"],
        true,
        "ENABLE_GOOGLE_CLOUD_STT",
    ),
    entry(
        ProviderId::Deepgram,
        "Deepgram",
        Stage::Stt,
        &["DEEPGRAM_API_KEY"],
        true,
        "ENABLE_DEEPGRAM",
    ),
    entry(
        ProviderId::AwsTranscribe,
        "AWS Transcribe",
        Stage::Stt,
        &[
            "AWS_ACCESS_KEY_ID",
            "AWS_SECRET_ACCESS_KEY",
            "AWS_REGION",
            "AWS_TRANSCRIBE_BUCKET",
        ],
        true,
        "ENABLE_AWS_TRANSCRIBE",
    ),
    entry(
        ProviderId::OpenAiWhisper,
        "OpenAI Whisper API",
        Stage::Stt,
        &["OPENAI_API_KEY"],
        true,
        "ENABLE_OPENAI_WHISPER",
    ),
    entry(
        ProviderId::ElevenLabsStt,
        "ElevenLabs STT",
        Stage::Stt,
        &["ELEVENLABS_API_KEY"],
        true,
        "ENABLE_ELEVENLABS_STT",
    ),
    entry(
        ProviderId::WisprFlow,
        "Wispr Flow",
        Stage::Stt,
        &["WISPR_FLOW_API_KEY"],
        false,
        "ENABLE_WISPR_FLOW",
    ),
    entry(
        ProviderId::MurfFalcon,
        "Murf Falcon",
        Stage::Stt,
        &["MURF_FALCON_API_KEY"],
        true,
        "ENABLE_MURF_FALCON",
    ),
    entry(
        ProviderId::OpenAiApi,
        "OpenAI API",
        Stage::Ai,
        &["OPENAI_API_KEY"],
        true,
        "ENABLE_OPENAI_API",
    ),
    entry(
        ProviderId::Gemini,
        "Gemini",
        Stage::Ai,
        &["GEMINI_API_KEY"],
        true,
        "ENABLE_GEMINI",
    ),
    entry(
        ProviderId::AzureTts,
        "Azure Text-to-Speech",
        Stage::Tts,
        &["AZURE_TTS_KEY", "AZURE_TTS_REGION"],
        true,
        "ENABLE_AZURE_TTS",
    ),
    entry(
        ProviderId::GoogleCloudTts,
        "Google Cloud TTS",
        Stage::Tts,
        &["GOOGLE_CLOUD_TTS_API_KEY"],
        true,
        "ENABLE_GOOGLE_CLOUD_TTS",
    ),
    entry(
        ProviderId::OpenAiTts,
        "OpenAI TTS",
        Stage::Tts,
        &["OPENAI_API_KEY"],
        true,
        "ENABLE_OPENAI_TTS",
    ),
    entry(
        ProviderId::ElevenLabsTts,
        "ElevenLabs TTS",
        Stage::Tts,
        &["ELEVENLABS_API_KEY"],
        true,
        "ENABLE_ELEVENLABS_TTS",
    ),
    entry(
        ProviderId::AmazonPolly,
        "Amazon Polly",
        Stage::Tts,
        &["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY", "AWS_REGION"],
        true,
        "ENABLE_AMAZON_POLLY",
    ),
    entry(
        ProviderId::MurfTts,
        "Murf TTS",
        Stage::Tts,
        &["MURF_TTS_API_KEY"],
        true,
        "ENABLE_MURF_TTS",
    ),
];

/// Providers offered for selection, per stage, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StageOptions {
    stt: Vec<ProviderId>,
    ai: Vec<ProviderId>,
    tts: Vec<ProviderId>,
}

impl StageOptions {
    /// Every catalog provider offered
    #[must_use]
    pub fn all() -> Self {
        Self::from_enabled(ProviderId::ALL)
    }

    /// Partition an enabled set by stage
    pub fn from_enabled(enabled: impl IntoIterator<Item = ProviderId>) -> Self {
        let mut options = Self::default();
        for id in enabled {
            let bucket = match id.stage() {
                Stage::Stt => &mut options.stt,
                Stage::Ai => &mut options.ai,
                Stage::Tts => &mut options.tts,
            };
            if !bucket.contains(&id) {
                bucket.push(id);
            }
        }
        options
    }

    /// Providers offered for one stage
    #[must_use]
    pub fn for_stage(&self, stage: Stage) -> &[ProviderId] {
        match stage {
            Stage::Stt => &self.stt,
            Stage::Ai => &self.ai,
            Stage::Tts => &self.tts,
        }
    }

    /// Default selection for a stage
    #[must_use]
    pub fn first(&self, stage: Stage) -> Option<ProviderId> {
        self.for_stage(stage).first().copied()
    }

    #[must_use]
    pub fn contains(&self, id: ProviderId) -> bool {
        self.for_stage(id.stage()).contains(&id)
    }
}
