//! Playback port - Audio output and the local voice

use ai_speech::{SynthesisError, SynthesizedAudio};
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Plays synthesized audio
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Play the audio to completion
    async fn play(&self, audio: &SynthesizedAudio) -> Result<(), SynthesisError>;
}

/// Local speech used whenever cloud synthesis cannot be used.
///
/// Speaking never fails; implementations log and return when the platform
/// voice is unavailable.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocalVoice: Send + Sync {
    async fn speak(&self, text: &str);
}
