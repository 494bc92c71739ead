//! JSON file holding the preferences record

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::{PreferencesError, PreferencesStore};
use async_trait::async_trait;
use domain::Preferences;
use tokio::fs;
use tracing::{debug, instrument};

/// Preferences persisted as one JSON document
#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
}

impl FilePreferencesStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferencesStore for FilePreferencesStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_raw(&self) -> Result<Option<String>, PreferencesError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PreferencesError::Storage(e.to_string())),
        }
    }

    #[instrument(skip(self, preferences), fields(path = %self.path.display()))]
    async fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError> {
        let json = serde_json::to_string_pretty(preferences)
            .map_err(|e| PreferencesError::Encoding(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PreferencesError::Storage(e.to_string()))?;
        }

        // Write then rename so a crash never leaves a half-written record
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)
            .await
            .map_err(|e| PreferencesError::Storage(e.to_string()))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| PreferencesError::Storage(e.to_string()))?;

        debug!("Preferences saved");
        Ok(())
    }
}
