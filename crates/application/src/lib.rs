//! Application layer - Stage orchestration for a voice conversation
//!
//! Wires the cloud stage adapters from `ai_speech` and `ai_core` into three
//! orchestrators that apply the fallback policy, and sequences them in the
//! [`ConversationPipeline`]. Device, playback and storage access go through
//! the ports defined here.

pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{CaptureError, PipelineError};
pub use ports::*;
pub use registry::ProviderRegistry;
pub use services::*;
