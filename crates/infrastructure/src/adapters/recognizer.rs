//! Local recognizer fed with a transcript supplied up front

use std::sync::atomic::{AtomicBool, Ordering};

use application::LocalRecognizer;
use parking_lot::Mutex;
use tracing::debug;

/// On-device recognizer stand-in.
///
/// The transcript is known before recording starts (for example passed on
/// the command line); `stop` hands it out once per session and yields an
/// empty string if the recognizer was never started.
#[derive(Debug, Default)]
pub struct SharedTranscriptRecognizer {
    transcript: Mutex<String>,
    listening: AtomicBool,
}

impl SharedTranscriptRecognizer {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: Mutex::new(transcript.into()),
            listening: AtomicBool::new(false),
        }
    }

    /// Replace the transcript returned by the next `stop`
    pub fn set_transcript(&self, transcript: impl Into<String>) {
        *self.transcript.lock() = transcript.into();
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::Acquire)
    }
}

impl LocalRecognizer for SharedTranscriptRecognizer {
    fn start(&self) {
        self.listening.store(true, Ordering::Release);
        debug!("Local recognizer started");
    }

    fn stop(&self) -> String {
        if !self.listening.swap(false, Ordering::AcqRel) {
            return String::new();
        }
        std::mem::take(&mut *self.transcript.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_yields_nothing() {
        let recognizer = SharedTranscriptRecognizer::new("hello");
        assert_eq!(recognizer.stop(), "");
    }

    #[test]
    fn transcript_is_handed_out_once() {
        let recognizer = SharedTranscriptRecognizer::new("hello there");

        recognizer.start();
        assert!(recognizer.is_listening());
        assert_eq!(recognizer.stop(), "hello there");
        assert!(!recognizer.is_listening());

        recognizer.start();
        assert_eq!(recognizer.stop(), "");
    }

    #[test]
    fn transcript_can_be_replaced() {
        let recognizer = SharedTranscriptRecognizer::default();
        recognizer.set_transcript("second take");
        recognizer.start();
        assert_eq!(recognizer.stop(), "second take");
    }
}
