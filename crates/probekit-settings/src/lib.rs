//! ProbeKit Settings Crate
//!
//! Handles application configuration and turns it into a processing pipeline.

pub mod config;
pub mod error;

pub use config::{Config, ToolChangeSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
