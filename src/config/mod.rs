// SPDX-License-Identifier: MPL-2.0
//! This module handles the preview's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use image_preview::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{DEFAULT_SCRIPT, DEFAULT_STYLESHEET};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ImagePreview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    /// Bundled stylesheet path below the extension root.
    #[serde(default)]
    pub stylesheet: Option<String>,
    /// Bundled bootstrap script path below the extension root.
    #[serde(default)]
    pub script: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            stylesheet: Some(DEFAULT_STYLESHEET.to_string()),
            script: Some(DEFAULT_SCRIPT.to_string()),
        }
    }
}

impl Config {
    #[must_use]
    pub fn stylesheet(&self) -> &str {
        self.stylesheet.as_deref().unwrap_or(DEFAULT_STYLESHEET)
    }

    #[must_use]
    pub fn script(&self) -> &str {
        self.script.as_deref().unwrap_or(DEFAULT_SCRIPT)
    }
}

/// Location of `settings.toml` in the platform configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Loads the user's settings; a missing file yields the defaults.
pub fn load() -> Result<Config> {
    match config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

pub fn save(config: &Config) -> Result<()> {
    match config_path() {
        Some(path) => save_to_path(config, &path),
        None => Ok(()),
    }
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring invalid config at {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
