//! Optional configuration file.
//!
//! Configuration is read from TOML. Every key is optional; a missing file
//! means built-in defaults, which reproduce the stock behavior.
//!
//! # Configuration File Format
//!
//! ```toml
//! [classifier]
//! cache_marker = "/.dropbox.cache/"
//!
//! [output]
//! color = "always"   # always | auto | never
//! ```

use crate::output::ColorMode;
use crate::record::{Classifier, DEFAULT_CACHE_MARKER};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".s3dryviewrc.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// The cache marker is empty and would match every line.
    #[error("Invalid configuration: cache_marker must not be empty")]
    EmptyCacheMarker,
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    Io(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub classifier: ClassifierSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// `[classifier]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierSection {
    /// Path fragment identifying cache content.
    #[serde(default = "default_cache_marker")]
    pub cache_marker: String,
}

fn default_cache_marker() -> String {
    DEFAULT_CACHE_MARKER.to_string()
}

impl Default for ClassifierSection {
    fn default() -> Self {
        Self {
            cache_marker: default_cache_marker(),
        }
    }
}

/// `[output]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub color: ColorMode,
}

impl Config {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Lookup order:
    /// 1. `config_path`, if provided
    /// 2. `.s3dryviewrc.toml` in the current directory
    /// 3. `~/.config/s3dryview/config.toml`
    /// 4. Built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found (or explicitly given) but cannot
    /// be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("s3dryview")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Build a classifier from this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EmptyCacheMarker` if the marker is empty.
    pub fn classifier(&self) -> Result<Classifier, ConfigError> {
        if self.classifier.cache_marker.is_empty() {
            return Err(ConfigError::EmptyCacheMarker);
        }
        Ok(Classifier::new(self.classifier.cache_marker.clone()))
    }
}
