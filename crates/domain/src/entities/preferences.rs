//! Persisted user preferences

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entities::StageOptions;
use crate::value_objects::{ProviderId, Stage};

/// Fixed storage key of the preferences record
pub const PREFERENCES_STORAGE_KEY: &str = "multiServiceChatbotPreferences";

/// Name used when the user has not entered one
pub const DEFAULT_USER_NAME: &str = "Guest";

/// Voice ids used when no override is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDefaults {
    pub eleven_labs_voice_id: String,
    pub murf_tts_voice_id: String,
}

/// Per-user selection of providers, display name and voice overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub user_name: String,
    pub stt_service: Option<ProviderId>,
    pub ai_service: Option<ProviderId>,
    pub tts_service: Option<ProviderId>,
    pub eleven_labs_voice_id: String,
    pub murf_tts_voice_id: String,
}

impl Preferences {
    /// First enabled provider per stage, default voices, no name
    #[must_use]
    pub fn defaults(options: &StageOptions, voices: &VoiceDefaults) -> Self {
        Self {
            user_name: String::new(),
            stt_service: options.first(Stage::Stt),
            ai_service: options.first(Stage::Ai),
            tts_service: options.first(Stage::Tts),
            eleven_labs_voice_id: voices.eleven_labs_voice_id.clone(),
            murf_tts_voice_id: voices.murf_tts_voice_id.clone(),
        }
    }

    /// Rebuild preferences from a stored record.
    ///
    /// Fails open: unparsable input yields the defaults, and each field that is
    /// missing, mistyped or no longer offered falls back individually.
    #[must_use]
    pub fn from_stored(raw: &str, options: &StageOptions, voices: &VoiceDefaults) -> Self {
        let defaults = Self::defaults(options, voices);
        let Ok(Value::Object(stored)) = serde_json::from_str::<Value>(raw) else {
            return defaults;
        };

        let selection = |field: &str, stage: Stage| {
            stored
                .get(field)
                .and_then(Value::as_str)
                .and_then(ProviderId::from_name)
                .filter(|id| options.for_stage(stage).contains(id))
                .or_else(|| options.first(stage))
        };
        let voice = |field: &str, fallback: &str| {
            stored
                .get(field)
                .and_then(Value::as_str)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            user_name: stored
                .get("userName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            stt_service: selection("sttService", Stage::Stt),
            ai_service: selection("aiService", Stage::Ai),
            tts_service: selection("ttsService", Stage::Tts),
            eleven_labs_voice_id: voice("elevenLabsVoiceId", &defaults.eleven_labs_voice_id),
            murf_tts_voice_id: voice("murfTtsVoiceId", &defaults.murf_tts_voice_id),
        }
    }

    /// Name to address the user by
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.user_name.trim();
        if trimmed.is_empty() { DEFAULT_USER_NAME } else { trimmed }
    }

    /// Selected provider for a stage
    #[must_use]
    pub const fn selection(&self, stage: Stage) -> Option<ProviderId> {
        match stage {
            Stage::Stt => self.stt_service,
            Stage::Ai => self.ai_service,
            Stage::Tts => self.tts_service,
        }
    }

    /// Select a provider for its own stage
    pub fn select(&mut self, id: ProviderId) {
        match id.stage() {
            Stage::Stt => self.stt_service = Some(id),
            Stage::Ai => self.ai_service = Some(id),
            Stage::Tts => self.tts_service = Some(id),
        }
    }

    /// Recording needs a provider on every stage
    #[must_use]
    pub const fn can_record(&self) -> bool {
        self.stt_service.is_some() && self.ai_service.is_some() && self.tts_service.is_some()
    }

    /// Stored voice override for the given TTS provider, if any
    #[must_use]
    pub fn voice_override(&self, id: ProviderId) -> Option<&str> {
        let voice = match id {
            ProviderId::ElevenLabsTts => &self.eleven_labs_voice_id,
            ProviderId::MurfTts => &self.murf_tts_voice_id,
            _ => return None,
        };
        Some(voice.trim()).filter(|v| !v.is_empty())
    }
}
