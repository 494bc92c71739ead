//! Infrastructure layer - Settings, logging and local adapters
//!
//! Implements the device, playback and preferences ports defined in the
//! application layer and wires the cloud adapters into a registry.

pub mod adapters;
pub mod config;
pub mod registry;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppSettings, ENV_PREFIX, SETTINGS_FILE, SettingsError};
pub use registry::{BuildError, build_registry};
pub use telemetry::{LoggingConfig, TelemetryError, init_logging, verbosity_filter};
