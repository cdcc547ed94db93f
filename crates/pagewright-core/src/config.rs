//! Editor configuration.

use crate::document::DEFAULT_PAGE_GAP;
use crate::geometry::deserialize_size;
use crate::page::DEFAULT_PAGE_SIZE;
use crate::snap::DEFAULT_SNAP_TOLERANCE;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Tunable editor settings. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum distance, in page pixels, at which two centers align.
    pub snap_tolerance: f64,
    /// Vertical gap between stacked pages.
    pub page_gap: f64,
    /// Size of newly added pages.
    #[serde(deserialize_with = "deserialize_size")]
    pub page_size: Size,
    /// Width of the area pages are centered in.
    pub viewport_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: DEFAULT_SNAP_TOLERANCE,
            page_gap: DEFAULT_PAGE_GAP,
            page_size: DEFAULT_PAGE_SIZE,
            viewport_width: 1280.0,
        }
    }
}

impl EditorConfig {
    /// Load a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    /// Default config location.
    ///
    /// On Unix: `~/.config/pagewright/config.json`
    /// On Windows: `%APPDATA%\pagewright\config.json`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("pagewright").join("config.json"))
    }
}
