//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! devices and storage. Adapters in the infrastructure layer implement these
//! ports; the cloud stage ports live in `ai_speech` and `ai_core`.

mod capture_port;
mod playback_port;
mod preferences_store;

pub use capture_port::{CaptureDevice, CaptureStream, LocalRecognizer};
#[cfg(test)]
pub use capture_port::{MockCaptureDevice, MockLocalRecognizer};
pub use playback_port::{AudioSink, LocalVoice};
#[cfg(test)]
pub use playback_port::{MockAudioSink, MockLocalVoice};
#[cfg(test)]
pub use preferences_store::MockPreferencesStore;
pub use preferences_store::{PreferencesError, PreferencesStore};
