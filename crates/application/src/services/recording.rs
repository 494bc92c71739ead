//! Recording session - Exclusive use of the capture device for one utterance

use std::sync::Arc;

use ai_speech::AudioPayload;
use tracing::{debug, instrument, warn};

use crate::error::CaptureError;
use crate::ports::{CaptureDevice, CaptureStream, LocalRecognizer};

/// What one recording produced
#[derive(Debug, Clone)]
pub struct CapturedUtterance {
    pub audio: AudioPayload,
    /// On-device transcript, possibly empty
    pub local_transcript: String,
}

/// Owns the capture device from `start` until the session ends.
///
/// The device is released exactly once on every exit path: `stop`,
/// `cancel`, a failed start, or drop.
pub struct RecordingSession {
    stream: Option<Box<dyn CaptureStream>>,
    recognizer: Arc<dyn LocalRecognizer>,
}

impl std::fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingSession")
            .field("active", &self.stream.is_some())
            .finish_non_exhaustive()
    }
}

impl RecordingSession {
    /// Acquire the device, start recording and start the local recognizer
    #[instrument(skip_all)]
    pub async fn start(
        device: &dyn CaptureDevice,
        recognizer: Arc<dyn LocalRecognizer>,
    ) -> Result<Self, CaptureError> {
        let stream = device.open().await?;
        let mut session = Self {
            stream: Some(stream),
            recognizer,
        };

        if let Some(stream) = session.stream.as_mut() {
            // Dropping `session` on error releases the device.
            stream.begin().await?;
        }
        session.recognizer.start();
        debug!("Recording started");
        Ok(session)
    }

    /// Whether the device is still held
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    /// Stop recording and return the audio with the local transcript.
    ///
    /// The recognizer is read, not awaited.
    #[instrument(skip_all)]
    pub async fn stop(mut self) -> Result<CapturedUtterance, CaptureError> {
        let local_transcript = self.recognizer.stop();
        let audio = match self.stream.as_mut() {
            Some(stream) => stream.finish().await,
            None => Err(CaptureError::Recording("session already closed".to_string())),
        };
        self.close();

        let audio = audio?;
        debug!(audio_size = audio.len(), local_chars = local_transcript.len(), "Recording stopped");
        Ok(CapturedUtterance {
            audio,
            local_transcript,
        })
    }

    /// Abandon the recording
    pub fn cancel(mut self) {
        self.recognizer.stop();
        self.close();
    }

    fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if self.stream.is_some() {
            warn!("Recording session dropped while active, releasing device");
            self.recognizer.stop();
            self.close();
        }
    }
}
