/// User preferences
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/image-quality-modifier/config.json
/// - macOS: ~/Library/Application Support/image-quality-modifier/config.json
/// - Windows: %APPDATA%\image-quality-modifier\config.json
///
/// Every field has a default, so a partial file is fine. A missing file is
/// created with the defaults on first run.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

const APP_DIR: &str = "image-quality-modifier";
const CONFIG_FILE: &str = "config.json";

/// When a slider change is turned into a re-encode
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RederivePolicy {
    /// Re-encode once, when the primary button is released
    #[default]
    OnRelease,
    /// Re-encode on every value change while dragging, and again on release
    Continuous,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Accept PNG input in addition to JPEG (output is always JPEG)
    pub accept_png: bool,

    pub rederive_policy: RederivePolicy,

    /// Snap the preview back to center when a pan drag ends
    pub reset_pan_on_release: bool,

    /// How long toast messages stay on screen
    pub toast_seconds: u64,

    /// Initial window size (not persisted on resize)
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            accept_png: false,
            rederive_policy: RederivePolicy::OnRelease,
            reset_pan_on_release: false,
            toast_seconds: 5,
            window_width: 1080.0,
            window_height: 620.0,
        }
    }
}

impl AppConfig {
    /// Load from the default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_or_init(&path),
            Err(err) => {
                tracing::warn!("{err}, using default settings");
                Self::default()
            }
        }
    }

    /// Load `path`, writing the defaults there first if it doesn't exist yet
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save_to(path) {
                Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
                Err(err) => tracing::warn!("Could not write {}: {err}", path.display()),
            }
            return config;
        }

        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded settings from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("Ignoring config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Write pretty JSON, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::MissingConfigDir)?;
        path.push(APP_DIR);
        path.push(CONFIG_FILE);
        Ok(path)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
