//! Application services - Stage orchestrators and the conversation pipeline

mod pipeline;
mod preferences_service;
mod recording;
mod response;
mod synthesis;
mod transcription;

pub use pipeline::{ConversationPipeline, TurnInput};
pub use preferences_service::PreferencesService;
pub use recording::{CapturedUtterance, RecordingSession};
pub use response::{ResponseOrchestrator, canned_reply};
pub use synthesis::{SynthesisOrchestrator, SynthesisOutcome};
pub use transcription::{StageOutput, TranscriptionOrchestrator};
