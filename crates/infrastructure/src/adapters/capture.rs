//! Capture device backed by a pre-recorded audio file
//!
//! Stands in for a microphone on the command line: `begin` checks the file
//! is readable, `finish` yields its bytes with a MIME type derived from the
//! file extension.

use std::path::{Path, PathBuf};

use ai_speech::{AudioFormat, AudioPayload};
use application::{CaptureDevice, CaptureError, CaptureStream};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

/// Audio file treated as the recording device
#[derive(Debug, Clone)]
pub struct FileCaptureDevice {
    path: PathBuf,
}

impl FileCaptureDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn mime_type(&self) -> &'static str {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(AudioFormat::from_extension)
            .unwrap_or(AudioFormat::Webm)
            .mime_type()
    }
}

#[async_trait]
impl CaptureDevice for FileCaptureDevice {
    async fn open(&self) -> Result<Box<dyn CaptureStream>, CaptureError> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Err(CaptureError::Unavailable(format!(
                "{} does not exist",
                self.path.display()
            )));
        }
        Ok(Box::new(FileCaptureStream {
            path: self.path.clone(),
            mime_type: self.mime_type(),
            released: false,
        }))
    }
}

struct FileCaptureStream {
    path: PathBuf,
    mime_type: &'static str,
    released: bool,
}

#[async_trait]
impl CaptureStream for FileCaptureStream {
    async fn begin(&mut self) -> Result<(), CaptureError> {
        let metadata = fs::metadata(&self.path)
            .await
            .map_err(|e| CaptureError::Recording(e.to_string()))?;
        if !metadata.is_file() {
            return Err(CaptureError::Recording(format!(
                "{} is not a file",
                self.path.display()
            )));
        }
        debug!(path = %self.path.display(), "Capture started");
        Ok(())
    }

    async fn finish(&mut self) -> Result<AudioPayload, CaptureError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| CaptureError::Recording(e.to_string()))?;
        Ok(AudioPayload::new(bytes, self.mime_type))
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            debug!(path = %self.path.display(), "Capture device released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let device = FileCaptureDevice::new("/nonexistent/recording.webm");

        let err = device.open().await.err().unwrap();
        assert!(matches!(err, CaptureError::Unavailable(_)));
    }

    #[tokio::test]
    async fn recording_reads_file_with_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");
        std::fs::write(&path, b"RIFFdata").unwrap();

        let device = FileCaptureDevice::new(&path);
        let mut stream = device.open().await.unwrap();
        stream.begin().await.unwrap();
        let audio = stream.finish().await.unwrap();
        stream.release();

        assert_eq!(audio.len(), 8);
        assert_eq!(audio.format(), AudioFormat::Wav);
    }

    #[tokio::test]
    async fn unknown_extension_defaults_to_webm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.bin");
        std::fs::write(&path, b"data").unwrap();

        let mut stream = FileCaptureDevice::new(&path).open().await.unwrap();
        let audio = stream.finish().await.unwrap();
        assert_eq!(audio.format(), AudioFormat::Webm);
    }

    #[tokio::test]
    async fn directory_cannot_be_recorded() {
        let dir = tempfile::tempdir().unwrap();

        let mut stream = FileCaptureDevice::new(dir.path()).open().await.unwrap();
        let err = stream.begin().await.unwrap_err();
        assert!(matches!(err, CaptureError::Recording(_)));
    }
}
