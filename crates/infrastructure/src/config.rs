//! Application settings
//!
//! Non-secret settings come from an optional `voicerelay.toml` plus
//! `VOICERELAY_*` environment overrides, with `__` separating nesting levels
//! (`VOICERELAY_SPEECH__TIMEOUT_MS`). Secrets never live here; they are read
//! through [`secure_config::ConfigAccessor`].

use std::path::{Path, PathBuf};

use ai_core::InferenceConfig;
use ai_speech::SpeechConfig;
use domain::{PREFERENCES_STORAGE_KEY, VoiceDefaults};
use secure_config::{ConfigAccessor, ConfigDecryptError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::telemetry::LoggingConfig;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE: &str = "voicerelay";

/// Prefix of environment overrides
pub const ENV_PREFIX: &str = "VOICERELAY";

/// Settings could not be loaded or are inconsistent
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid {section} settings: {reason}")]
    Invalid { section: &'static str, reason: String },

    #[error(transparent)]
    Decrypt(#[from] ConfigDecryptError),
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// STT and TTS adapters
    #[serde(default)]
    pub speech: SpeechConfig,

    /// AI-stage adapters
    #[serde(default)]
    pub inference: InferenceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Preferences file; defaults to the platform config directory
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,

    /// Dotenv file with provider keys; defaults to `.env` when present
    #[serde(default)]
    pub env_file: Option<PathBuf>,
}

impl AppSettings {
    /// Load from `voicerelay.toml` (if present) and the environment
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(None)
    }

    /// Load from an explicit file, which must exist, or the default lookup
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(SETTINGS_FILE).required(false),
        };

        let settings: Self = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        debug!(?path, "Settings loaded");
        Ok(settings)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.speech
            .validate()
            .map_err(|reason| SettingsError::Invalid {
                section: "speech",
                reason,
            })?;
        self.inference
            .validate()
            .map_err(|reason| SettingsError::Invalid {
                section: "inference",
                reason,
            })?;
        Ok(())
    }

    /// Apply provider overrides held in the key/value configuration
    pub fn with_overrides(mut self, accessor: &ConfigAccessor) -> Result<Self, SettingsError> {
        self.speech = self.speech.with_overrides(accessor)?;
        self.validate()?;
        Ok(self)
    }

    /// Voices used when the user has not overridden them
    pub fn voice_defaults(&self) -> VoiceDefaults {
        VoiceDefaults {
            eleven_labs_voice_id: self.speech.elevenlabs_voice_id.clone(),
            murf_tts_voice_id: self.speech.murf_tts_voice_id.clone(),
        }
    }

    /// Where the preferences record lives
    pub fn preferences_file(&self) -> PathBuf {
        self.preferences_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("voicerelay")
                .join(format!("{PREFERENCES_STORAGE_KEY}.json"))
        })
    }
}
