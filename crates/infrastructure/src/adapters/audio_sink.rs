//! Playback into a file
//!
//! The command line has no speaker to drive, so synthesized audio is
//! written where the user asked for it.

use std::path::{Path, PathBuf};

use ai_speech::{SynthesisError, SynthesizedAudio};
use application::AudioSink;
use async_trait::async_trait;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct FileAudioSink {
    path: PathBuf,
}

impl FileAudioSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AudioSink for FileAudioSink {
    #[instrument(skip(self, audio), fields(path = %self.path.display(), bytes = audio.data().len()))]
    async fn play(&self, audio: &SynthesizedAudio) -> Result<(), SynthesisError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SynthesisError::Playback(e.to_string()))?;
        }
        fs::write(&self.path, audio.data())
            .await
            .map_err(|e| SynthesisError::Playback(e.to_string()))?;
        info!(format = audio.format().extension(), "Reply audio written");
        Ok(())
    }
}
