//! Preferences store port

use async_trait::async_trait;
use domain::Preferences;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Preferences could not be read or written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferencesError {
    #[error("Preferences storage failed: {0}")]
    Storage(String),

    #[error("Preferences could not be encoded: {0}")]
    Encoding(String),
}

/// Persistence of the single preferences record
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    /// Raw stored record, `None` when nothing was saved yet
    async fn load_raw(&self) -> Result<Option<String>, PreferencesError>;

    /// Replace the stored record
    async fn save(&self, preferences: &Preferences) -> Result<(), PreferencesError>;
}
