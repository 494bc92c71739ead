//! Infrastructure adapters
//!
//! Adapters connect application ports to local files and programs.

mod audio_sink;
mod capture;
mod preferences_store;
mod recognizer;
mod voice;

pub use audio_sink::FileAudioSink;
pub use capture::FileCaptureDevice;
pub use preferences_store::FilePreferencesStore;
pub use recognizer::SharedTranscriptRecognizer;
pub use voice::CommandVoice;
