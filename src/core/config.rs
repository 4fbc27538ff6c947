//! User configuration
//!
//! Loaded from `.fib2tem.json` in the working directory, or from
//! `<config_dir>/fib2tem/config.json`. Every field is optional.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{OrientationError, Result};
use super::models::{MillingAngle, OutputFormat, ShuttleType};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".fib2tem.json";

/// Environment variable overriding the output format
pub const FORMAT_ENV_VAR: &str = "FIB2TEM_FORMAT";

/// Configuration loaded from `.fib2tem.json`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    /// Shuttle used when none is given on the command line
    #[serde(default)]
    pub default_shuttle: Option<ShuttleType>,
    /// Milling angle used when none is given
    #[serde(default)]
    pub default_milling_angle: MillingAngle,
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a file. A missing file yields defaults; a malformed one is an error.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| OrientationError::invalid_config(path, e.to_string()))
    }

    /// Find and load the configuration.
    ///
    /// An explicit path must exist. Otherwise the first existing file among
    /// [`Config::search_paths`] is used, falling back to defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(OrientationError::invalid_config(path, "file not found"));
            }
            debug!("loading config from {}", path.display());
            return Self::load_from_file(path);
        }

        for path in Self::search_paths() {
            if path.exists() {
                debug!("loading config from {}", path.display());
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Candidate config files, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(LOCAL_CONFIG_FILE));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("fib2tem").join("config.json"));
        }

        paths
    }

    /// Apply `FIB2TEM_FORMAT` from the environment
    pub fn with_env(self) -> Self {
        self.with_format_override(std::env::var(FORMAT_ENV_VAR).ok().as_deref())
    }

    /// Replace the format if `value` names one; unknown names are ignored with a warning
    pub fn with_format_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match OutputFormat::parse(value) {
                Some(format) => self.format = format,
                None => warn!("ignoring {}='{}': unknown format", FORMAT_ENV_VAR, value),
            }
        }
        self
    }
}
