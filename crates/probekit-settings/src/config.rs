//! Configuration for ProbeKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, selected by file extension, stored in the platform
//! config directory by default.
//!
//! Configuration is organized into sections:
//! - General (help language)
//! - Tool change (park position and probe commands)

use probekit_core::Language;
use probekit_gcode::{ProcessorPipeline, ToolChangeProcessor};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Application directory name under the platform config dir
const APP_DIR: &str = "probekit";

/// Default config file name
const CONFIG_FILE: &str = "config.toml";

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Tool change settings
///
/// Park coordinates are machine coordinates (G53). Keys left out of the
/// `[tool_change]` section keep their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolChangeSettings {
    /// Whether tool changes are intercepted
    pub enabled: bool,
    /// Park X position
    pub x: f64,
    /// Park Y position
    pub y: f64,
    /// Park Z height
    pub z: f64,
    /// Command that moves to the tool length probe
    pub probe_move_command: String,
    /// Command that runs the measurement
    pub probe_action_command: String,
}

impl Default for ToolChangeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            probe_move_command: "G53G0X0Y0".to_string(),
            probe_action_command: "G38.2Z-50F100".to_string(),
        }
    }
}

impl ToolChangeSettings {
    /// Validate settings
    pub fn validate(&self) -> ConfigResult<()> {
        for (key, value) in [("x", self.x), ("y", self.y), ("z", self.z)] {
            if !value.is_finite() {
                return Err(ConfigError::ValueOutOfRange {
                    key: format!("tool_change.{}", key),
                    value: value.to_string(),
                });
            }
        }

        if self.probe_move_command.trim().is_empty() {
            return Err(ConfigError::MissingKey(
                "tool_change.probe_move_command".to_string(),
            ));
        }
        if self.probe_action_command.trim().is_empty() {
            return Err(ConfigError::MissingKey(
                "tool_change.probe_action_command".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the tool change processor described by these settings
    pub fn build_processor(&self, language: Language) -> ToolChangeProcessor {
        ToolChangeProcessor::new(
            self.x,
            self.y,
            self.z,
            self.probe_move_command.clone(),
            self.probe_action_command.clone(),
        )
        .with_language(language)
        .with_enabled(self.enabled)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Language for processor help text
    #[serde(default)]
    pub language: Language,
    /// Tool change interception
    #[serde(default)]
    pub tool_change: ToolChangeSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                crate::SettingsError::ConfigDirectory(
                    "no platform config directory".to_string(),
                )
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or from the default location
    ///
    /// A missing file at the default location yields the default config; an
    /// explicitly requested file must exist.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = Self::default_path()?;
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            tracing::debug!(
                "No config at {}, using defaults",
                default_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.tool_change.validate()
    }

    /// Build the processing pipeline described by this configuration
    pub fn build_pipeline(&self) -> ProcessorPipeline {
        let mut pipeline = ProcessorPipeline::new();
        pipeline.register(Arc::new(self.tool_change.build_processor(self.language)));
        pipeline
    }
}
