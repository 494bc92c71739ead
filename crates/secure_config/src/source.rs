//! Raw key/value configuration sources

use std::collections::HashMap;
use std::env;
use std::path::Path;

use tracing::{debug, warn};

/// Flat string-keyed configuration store.
///
/// Values are returned raw; decryption is the accessor's job.
pub trait ConfigSource: Send + Sync {
    fn raw(&self, key: &str) -> Option<String>;
}

/// In-memory source, used for tests and for values assembled at startup
#[derive(Debug, Clone, Default)]
pub struct MapConfigSource {
    values: HashMap<String, String>,
}

impl MapConfigSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapConfigSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ConfigSource for MapConfigSource {
    fn raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Process environment layered over an optional dotenv file.
///
/// The file is parsed once and never written into the process environment;
/// variables already set in the environment win.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigSource {
    file_values: HashMap<String, String>,
}

impl EnvConfigSource {
    /// Process environment only
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process environment over the dotenv file at `path`
    pub fn with_dotenv(path: &Path) -> Result<Self, dotenvy::Error> {
        let mut file_values = HashMap::new();
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            file_values.insert(key, value);
        }
        debug!(path = %path.display(), entries = file_values.len(), "Loaded dotenv file");
        Ok(Self { file_values })
    }

    /// Process environment over `.env` in the working directory, if present
    #[must_use]
    pub fn discover() -> Self {
        match Self::with_dotenv(Path::new(".env")) {
            Ok(source) => source,
            Err(e) if e.not_found() => Self::new(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable .env file");
                Self::new()
            },
        }
    }
}

impl ConfigSource for EnvConfigSource {
    fn raw(&self, key: &str) -> Option<String> {
        env::var(key)
            .ok()
            .or_else(|| self.file_values.get(key).cloned())
    }
}
