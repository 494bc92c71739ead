//! Preferences service - Load once, fail open, rewrite on change

use std::sync::Arc;

use domain::{Preferences, StageOptions, VoiceDefaults};
use tracing::{debug, instrument, warn};

use crate::ports::{PreferencesError, PreferencesStore};

/// Reads and writes the preferences record against the enabled providers
pub struct PreferencesService {
    store: Arc<dyn PreferencesStore>,
    options: StageOptions,
    voices: VoiceDefaults,
}

impl std::fmt::Debug for PreferencesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferencesService")
            .field("options", &self.options)
            .field("voices", &self.voices)
            .finish_non_exhaustive()
    }
}

impl PreferencesService {
    pub fn new(store: Arc<dyn PreferencesStore>, options: StageOptions, voices: VoiceDefaults) -> Self {
        Self {
            store,
            options,
            voices,
        }
    }

    /// Enabled providers per stage
    pub fn options(&self) -> &StageOptions {
        &self.options
    }

    /// Stored preferences, or defaults when nothing usable is stored
    #[instrument(skip(self))]
    pub async fn load(&self) -> Preferences {
        match self.store.load_raw().await {
            Ok(Some(raw)) => Preferences::from_stored(&raw, &self.options, &self.voices),
            Ok(None) => {
                debug!("No stored preferences, using defaults");
                Preferences::defaults(&self.options, &self.voices)
            },
            Err(e) => {
                warn!(error = %e, "Failed to read preferences, using defaults");
                Preferences::defaults(&self.options, &self.voices)
            },
        }
    }

    /// Apply `change` to the stored preferences and write them back
    pub async fn update<F>(&self, change: F) -> Result<Preferences, PreferencesError>
    where
        F: FnOnce(&mut Preferences) + Send,
    {
        let mut preferences = self.load().await;
        change(&mut preferences);
        self.store.save(&preferences).await?;
        Ok(preferences)
    }
}
