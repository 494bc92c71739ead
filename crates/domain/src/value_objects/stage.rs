//! Pipeline stage a provider serves

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three stages of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Speech-to-text
    Stt,
    /// Response generation
    Ai,
    /// Text-to-speech
    Tts,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Self; 3] = [Self::Stt, Self::Ai, Self::Tts];

    /// Short label used in logs and CLI output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stt => "STT",
            Self::Ai => "AI",
            Self::Tts => "TTS",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
