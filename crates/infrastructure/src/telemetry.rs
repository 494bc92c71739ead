//! Logging initialization
//!
//! `RUST_LOG` wins when set; otherwise the filter comes from the CLI
//! verbosity or the configured default.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when neither `RUST_LOG` nor a verbosity flag is given
    #[serde(default = "default_log_filter")]
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "warn,voicerelay=info,application=info,infrastructure=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    Init(String),
}

/// Filter directive for `-v` repetitions; `None` keeps the configured filter
pub fn verbosity_filter(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install the global subscriber; logs go to stderr
pub fn init_logging(config: &LoggingConfig, verbosity: u8) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(verbosity_filter(verbosity).unwrap_or(&config.filter))
            .map_err(|e| TelemetryError::Init(e.to_string()))
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(json = config.json, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(verbosity_filter(0), None);
        assert_eq!(verbosity_filter(1), Some("info"));
        assert_eq!(verbosity_filter(2), Some("debug"));
        assert_eq!(verbosity_filter(7), Some("trace"));
    }

    #[test]
    fn default_config_filter_parses() {
        assert!(EnvFilter::try_new(LoggingConfig::default().filter).is_ok());
    }

    #[test]
    fn missing_logging_fields_use_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"json": true}"#).unwrap();
        assert!(config.json);
        assert_eq!(config.filter, "warn,voicerelay=info,application=info,infrastructure=info");
    }
}
