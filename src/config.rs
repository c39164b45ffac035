//! Configuration for the persona-tags engine
//!
//! Supports multiple configuration sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (PERSONA_TAGS_* prefix)
//! 2. Configuration file (TOML), when the embedder passes a path
//! 3. Default values

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::color::ColorMode;
use crate::error::{Error, Result};

/// Main engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfig {
    /// Color generation settings
    pub color: ColorSettings,

    /// Panel readiness watcher settings
    pub watcher: WatcherSettings,

    /// Garbage collection settings
    pub gc: GcSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Color generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Brightness band for generated colors: "light" or "dark"
    pub default_mode: String,

    /// Cap on rejection-sampling attempts before falling back
    pub max_attempts: u32,
}

/// Panel readiness watcher settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    /// Fixed poll interval in milliseconds
    pub poll_interval_ms: u64,
}

/// Garbage collection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GcSettings {
    /// Drop collected tag ids from the active filter selection
    pub purge_filter_selection: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

// Default implementations

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            default_mode: "light".to_string(),
            max_attempts: 1000,
        }
    }
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
        }
    }
}

impl Default for GcSettings {
    fn default() -> Self {
        Self {
            purge_filter_selection: true,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TagsConfig {
    /// Load configuration, optionally from a TOML file, with environment
    /// variable overrides applied on top.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(path)?;
            config = toml::from_str(&content).map_err(|e| Error::ConfigParse {
                message: format!("Failed to parse {}", path.display()),
                source: Some(e),
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PERSONA_TAGS_COLOR_MODE") {
            self.color.default_mode = val;
        }
        if let Ok(val) = std::env::var("PERSONA_TAGS_COLOR_MAX_ATTEMPTS") {
            if let Ok(n) = val.parse() {
                self.color.max_attempts = n;
            }
        }
        if let Ok(val) = std::env::var("PERSONA_TAGS_POLL_INTERVAL_MS") {
            if let Ok(n) = val.parse() {
                self.watcher.poll_interval_ms = n;
            }
        }
        if let Ok(val) = std::env::var("PERSONA_TAGS_GC_PURGE_FILTER") {
            self.gc.purge_filter_selection = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = std::env::var("PERSONA_TAGS_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if ColorMode::parse(&self.color.default_mode).is_none() {
            return Err(Error::Config(format!(
                "color.default_mode must be 'light' or 'dark', got '{}'",
                self.color.default_mode
            )));
        }
        if self.color.max_attempts == 0 {
            return Err(Error::Config(
                "color.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.watcher.poll_interval_ms == 0 {
            return Err(Error::Config(
                "watcher.poll_interval_ms must be at least 1".to_string(),
            ));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "logging.level must be one of {:?}, got '{}'",
                valid_levels, self.logging.level
            )));
        }

        Ok(())
    }

    /// The configured default color mode.
    pub fn default_color_mode(&self) -> ColorMode {
        // validate() guarantees this parses
        ColorMode::parse(&self.color.default_mode).unwrap_or(ColorMode::Light)
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
