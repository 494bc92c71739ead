//! Types for speech processing
//!
//! Contains the normalized audio payload, media formats, transcriptions and
//! synthesis requests shared by every adapter.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Supported audio container formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WebM container (what browsers and most recorders produce)
    #[default]
    Webm,
    /// OGG container
    Ogg,
    /// WAV format (uncompressed)
    Wav,
    /// MP3 format
    Mp3,
    /// FLAC format (lossless)
    Flac,
    /// MP4/M4A container
    Mp4,
}

impl AudioFormat {
    /// Get the MIME type for this audio format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// File extension, also used as the batch-job media format name
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Mp4 => "mp4",
        }
    }

    /// Derive the format from a loose mime hint; unknown hints map to WebM
    #[must_use]
    pub fn from_mime_hint(hint: &str) -> Self {
        let hint = hint.to_ascii_lowercase();
        if hint.contains("webm") {
            Self::Webm
        } else if hint.contains("ogg") {
            Self::Ogg
        } else if hint.contains("wav") {
            Self::Wav
        } else if hint.contains("mpeg") || hint.contains("mp3") {
            Self::Mp3
        } else if hint.contains("flac") {
            Self::Flac
        } else if hint.contains("mp4") || hint.contains("m4a") {
            Self::Mp4
        } else {
            Self::Webm
        }
    }

    /// Guess the format from a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "webm" => Some(Self::Webm),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "flac" => Some(Self::Flac),
            "mp4" | "m4a" => Some(Self::Mp4),
            _ => None,
        }
    }
}

/// Recorded audio handed to a transcription adapter.
///
/// Adapters only borrow the payload for the duration of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Bytes,
    mime_hint: String,
}

impl AudioPayload {
    /// Create a payload; the hint may be empty when the recorder reported none
    pub fn new(bytes: impl Into<Bytes>, mime_hint: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_hint: mime_hint.into().trim().to_string(),
        }
    }

    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Mime hint as reported by the recorder, possibly empty
    #[must_use]
    pub fn mime_hint(&self) -> &str {
        &self.mime_hint
    }

    /// Mime hint, or `default` when none was reported
    #[must_use]
    pub fn content_type<'a>(&'a self, default: &'a str) -> &'a str {
        if self.mime_hint.is_empty() {
            default
        } else {
            &self.mime_hint
        }
    }

    /// Media format derived from the hint
    #[must_use]
    pub fn format(&self) -> AudioFormat {
        AudioFormat::from_mime_hint(&self.mime_hint)
    }

    /// Upload file name carrying the derived extension
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("recording.{}", self.format().extension())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of speech-to-text transcription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcription {
    /// Transcribed text, trimmed
    pub text: String,
}

impl Transcription {
    /// Create a transcription, trimming surrounding whitespace
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

/// Text to speak, with an optional voice override
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Text to synthesize
    pub text: String,
    /// Provider-specific voice id; `None` uses the configured default
    pub voice_id: Option<String>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice_id: None,
        }
    }

    #[must_use]
    pub fn with_voice(mut self, voice_id: Option<&str>) -> Self {
        self.voice_id = voice_id
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ToString::to_string);
        self
    }

    /// Voice override, or `default`
    #[must_use]
    pub fn voice_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.voice_id.as_deref().unwrap_or(default)
    }
}

/// Audio produced by a synthesis adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    data: Bytes,
    format: AudioFormat,
}

impl SynthesizedAudio {
    pub fn new(data: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            data: data.into(),
            format,
        }
    }

    /// MP3 audio, the format every cloud adapter requests
    pub fn mp3(data: impl Into<Bytes>) -> Self {
        Self::new(data, AudioFormat::Mp3)
    }

    #[must_use]
    pub const fn data(&self) -> &Bytes {
        &self.data
    }

    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod audio_format_tests {
        use super::*;

        #[test]
        fn mime_hints_map_by_substring() {
            assert_eq!(AudioFormat::from_mime_hint("audio/webm;codecs=opus"), AudioFormat::Webm);
            assert_eq!(AudioFormat::from_mime_hint("audio/ogg; codecs=opus"), AudioFormat::Ogg);
            assert_eq!(AudioFormat::from_mime_hint("audio/x-wav"), AudioFormat::Wav);
            assert_eq!(AudioFormat::from_mime_hint("audio/mpeg"), AudioFormat::Mp3);
            assert_eq!(AudioFormat::from_mime_hint("AUDIO/FLAC"), AudioFormat::Flac);
            assert_eq!(AudioFormat::from_mime_hint("audio/mp4"), AudioFormat::Mp4);
        }

        #[test]
        fn unknown_hints_default_to_webm() {
            assert_eq!(AudioFormat::from_mime_hint(""), AudioFormat::Webm);
            assert_eq!(AudioFormat::from_mime_hint("application/octet-stream"), AudioFormat::Webm);
        }

        #[test]
        fn extensions_round_trip() {
            for format in [
                AudioFormat::Webm,
                AudioFormat::Ogg,
                AudioFormat::Wav,
                AudioFormat::Mp3,
                AudioFormat::Flac,
                AudioFormat::Mp4,
            ] {
                assert_eq!(AudioFormat::from_extension(format.extension()), Some(format));
            }
            assert_eq!(AudioFormat::from_extension("txt"), None);
        }
    }

    mod payload_tests {
        use super::*;

        #[test]
        fn content_type_falls_back_when_hint_missing() {
            let payload = AudioPayload::new(vec![1, 2, 3], "  ");
            assert_eq!(payload.content_type("audio/webm"), "audio/webm");
            assert_eq!(payload.file_name(), "recording.webm");
            assert_eq!(payload.len(), 3);
        }

        #[test]
        fn hint_drives_format_and_file_name() {
            let payload = AudioPayload::new(vec![1], "audio/wav");
            assert_eq!(payload.content_type("audio/webm"), "audio/wav");
            assert_eq!(payload.format(), AudioFormat::Wav);
            assert_eq!(payload.file_name(), "recording.wav");
        }
    }

    #[test]
    fn transcription_is_trimmed() {
        assert_eq!(Transcription::new("  hello world \n").text, "hello world");
        assert!(Transcription::new("   ").is_empty());
    }

    #[test]
    fn blank_voice_override_is_ignored() {
        let request = SynthesisRequest::new("hi").with_voice(Some("  "));
        assert_eq!(request.voice_or("default"), "default");
        let request = SynthesisRequest::new("hi").with_voice(Some(" custom "));
        assert_eq!(request.voice_or("default"), "custom");
    }
}
