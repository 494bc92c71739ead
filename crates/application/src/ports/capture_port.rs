//! Capture port - Microphone access and the on-device recognizer

use ai_speech::AudioPayload;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::CaptureError;

/// Source of recorded audio
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    /// Acquire the device for one recording
    async fn open(&self) -> Result<Box<dyn CaptureStream>, CaptureError>;
}

/// One acquired device handle
///
/// `release` must be safe to call more than once.
#[async_trait]
pub trait CaptureStream: Send {
    /// Start recording
    async fn begin(&mut self) -> Result<(), CaptureError>;

    /// Stop recording and hand over everything captured
    async fn finish(&mut self) -> Result<AudioPayload, CaptureError>;

    /// Stop all tracks and give the device back
    fn release(&mut self);
}

/// On-device recognizer running alongside a recording.
///
/// Its transcript is advisory and only consulted when cloud transcription
/// is unavailable or fails.
#[cfg_attr(test, automock)]
pub trait LocalRecognizer: Send + Sync {
    /// Begin listening; failures are swallowed
    fn start(&self);

    /// Stop listening and return whatever was recognized (possibly empty)
    fn stop(&self) -> String;
}
