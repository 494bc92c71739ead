//! Configuration for speech processing

use secure_config::{ConfigAccessor, ConfigDecryptError};
use serde::{Deserialize, Serialize};

/// Configuration for the speech adapters.
///
/// Base URLs are configurable so adapters can be pointed at mock servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// BCP-47 language used for recognition and synthesis
    #[serde(default = "default_language")]
    pub language: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Whisper model
    #[serde(default = "default_whisper_model")]
    pub whisper_model: String,

    /// OpenAI TTS model
    #[serde(default = "default_openai_tts_model")]
    pub openai_tts_model: String,

    /// OpenAI TTS voice
    #[serde(default = "default_openai_tts_voice")]
    pub openai_tts_voice: String,

    /// Deepgram API base URL
    #[serde(default = "default_deepgram_base_url")]
    pub deepgram_base_url: String,

    /// Deepgram model
    #[serde(default = "default_deepgram_model")]
    pub deepgram_model: String,

    /// ElevenLabs API base URL
    #[serde(default = "default_elevenlabs_base_url")]
    pub elevenlabs_base_url: String,

    /// ElevenLabs speech-to-text model
    #[serde(default = "default_elevenlabs_stt_model")]
    pub elevenlabs_stt_model: String,

    /// ElevenLabs text-to-speech model
    #[serde(default = "default_elevenlabs_tts_model")]
    pub elevenlabs_tts_model: String,

    /// Default ElevenLabs voice
    #[serde(default = "default_elevenlabs_voice_id")]
    pub elevenlabs_voice_id: String,

    /// Google Speech-to-Text base URL
    #[serde(default = "default_google_stt_base_url")]
    pub google_stt_base_url: String,

    /// Google Text-to-Speech base URL
    #[serde(default = "default_google_tts_base_url")]
    pub google_tts_base_url: String,

    /// Azure STT endpoint override; regional endpoint when unset
    #[serde(default)]
    pub azure_stt_endpoint: Option<String>,

    /// Azure TTS endpoint override; regional endpoint when unset
    #[serde(default)]
    pub azure_tts_endpoint: Option<String>,

    /// Azure neural voice
    #[serde(default = "default_azure_tts_voice")]
    pub azure_tts_voice: String,

    /// Murf API base URL
    #[serde(default = "default_murf_base_url")]
    pub murf_base_url: String,

    /// Voice used by the Murf voice changer when transcribing
    #[serde(default = "default_murf_voice_id")]
    pub murf_falcon_voice_id: String,

    /// Default Murf TTS voice
    #[serde(default = "default_murf_voice_id")]
    pub murf_tts_voice_id: String,

    /// Amazon Polly voice
    #[serde(default = "default_polly_voice_id")]
    pub polly_voice_id: String,

    /// Polly endpoint override; regional endpoint when unset
    #[serde(default)]
    pub polly_endpoint: Option<String>,

    /// AWS Transcribe batch-job settings
    #[serde(default)]
    pub transcribe: TranscribeConfig,
}

/// Settings for the upload-and-poll transcription flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeConfig {
    /// Object key prefix for uploads and job output
    #[serde(default = "default_transcribe_prefix")]
    pub prefix: String,

    /// Wait before each status check, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Status checks before giving up
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Transcribe endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,

    /// S3 endpoint override (path-style addressing is used when set)
    #[serde(default)]
    pub s3_endpoint: Option<String>,
}

const fn default_timeout_ms() -> u64 {
    30_000
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_whisper_model() -> String {
    "whisper-1".to_string()
}

fn default_openai_tts_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_openai_tts_voice() -> String {
    "alloy".to_string()
}

fn default_deepgram_base_url() -> String {
    "https://api.deepgram.com".to_string()
}

fn default_deepgram_model() -> String {
    "nova-2".to_string()
}

fn default_elevenlabs_base_url() -> String {
    "https://api.elevenlabs.io".to_string()
}

fn default_elevenlabs_stt_model() -> String {
    "scribe_v1".to_string()
}

fn default_elevenlabs_tts_model() -> String {
    "eleven_flash_v2_5".to_string()
}

fn default_elevenlabs_voice_id() -> String {
    "pNInz6obpgDQGcFmaJgB".to_string()
}

fn default_google_stt_base_url() -> String {
    "https://speech.googleapis.com".to_string()
}

fn default_google_tts_base_url() -> String {
    "https://texttospeech.googleapis.com".to_string()
}

fn default_azure_tts_voice() -> String {
    "en-US-JennyNeural".to_string()
}

fn default_murf_base_url() -> String {
    "https://api.murf.ai".to_string()
}

fn default_murf_voice_id() -> String {
    "en-US-natalie".to_string()
}

fn default_polly_voice_id() -> String {
    "Joanna".to_string()
}

fn default_transcribe_prefix() -> String {
    "voice-inputs".to_string()
}

const fn default_poll_interval_ms() -> u64 {
    2_000
}

const fn default_max_poll_attempts() -> u32 {
    30
}

impl Default for TranscribeConfig {
    fn default() -> Self {
        Self {
            prefix: default_transcribe_prefix(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            endpoint: None,
            s3_endpoint: None,
        }
    }
}

impl TranscribeConfig {
    /// Prefix without a trailing slash
    #[must_use]
    pub fn normalized_prefix(&self) -> &str {
        self.prefix.trim().trim_end_matches('/')
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            language: default_language(),
            openai_base_url: default_openai_base_url(),
            whisper_model: default_whisper_model(),
            openai_tts_model: default_openai_tts_model(),
            openai_tts_voice: default_openai_tts_voice(),
            deepgram_base_url: default_deepgram_base_url(),
            deepgram_model: default_deepgram_model(),
            elevenlabs_base_url: default_elevenlabs_base_url(),
            elevenlabs_stt_model: default_elevenlabs_stt_model(),
            elevenlabs_tts_model: default_elevenlabs_tts_model(),
            elevenlabs_voice_id: default_elevenlabs_voice_id(),
            google_stt_base_url: default_google_stt_base_url(),
            google_tts_base_url: default_google_tts_base_url(),
            azure_stt_endpoint: None,
            azure_tts_endpoint: None,
            azure_tts_voice: default_azure_tts_voice(),
            murf_base_url: default_murf_base_url(),
            murf_falcon_voice_id: default_murf_voice_id(),
            murf_tts_voice_id: default_murf_voice_id(),
            polly_voice_id: default_polly_voice_id(),
            polly_endpoint: None,
            transcribe: TranscribeConfig::default(),
        }
    }
}

impl SpeechConfig {
    /// Apply provider tuning keys from the configuration store.
    ///
    /// These keys live next to the credentials and may be encrypted.
    pub fn with_overrides(mut self, accessor: &ConfigAccessor) -> Result<Self, ConfigDecryptError> {
        let overrides: [(&str, &mut String); 7] = [
            ("ELEVENLABS_TTS_MODEL", &mut self.elevenlabs_tts_model),
            ("ELEVENLABS_VOICE_ID", &mut self.elevenlabs_voice_id),
            ("MURF_API_BASE_URL", &mut self.murf_base_url),
            ("MURF_FALCON_VOICE_ID", &mut self.murf_falcon_voice_id),
            ("MURF_TTS_VOICE_ID", &mut self.murf_tts_voice_id),
            ("AWS_POLLY_VOICE_ID", &mut self.polly_voice_id),
            ("AWS_TRANSCRIBE_PREFIX", &mut self.transcribe.prefix),
        ];
        for (key, field) in overrides {
            if let Some(value) = accessor.get_trimmed(key)? {
                *field = value;
            }
        }
        Ok(self)
    }

    /// Two-letter language code (`en` for `en-US`)
    #[must_use]
    pub fn language_code(&self) -> &str {
        self.language.split('-').next().unwrap_or(&self.language)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.transcribe.poll_interval_ms == 0 {
            return Err("Transcribe poll interval must be greater than 0".to_string());
        }

        if self.transcribe.max_poll_attempts == 0 {
            return Err("Transcribe poll attempts must be greater than 0".to_string());
        }

        if self.transcribe.normalized_prefix().is_empty() {
            return Err("Transcribe prefix must not be empty".to_string());
        }

        for (name, url) in [
            ("openai_base_url", &self.openai_base_url),
            ("deepgram_base_url", &self.deepgram_base_url),
            ("elevenlabs_base_url", &self.elevenlabs_base_url),
            ("google_stt_base_url", &self.google_stt_base_url),
            ("google_tts_base_url", &self.google_tts_base_url),
            ("murf_base_url", &self.murf_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{name} must be an http(s) URL, got '{url}'"));
            }
        }

        Ok(())
    }
}
