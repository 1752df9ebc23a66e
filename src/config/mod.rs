//! Configuration loading
//!
//! The config file is read-only from the client's point of view: nothing the
//! user changes in the interface is written back.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::MeetingSettings;
use crate::session::JoinPreferences;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin used when building shareable meeting links
    pub base_url: String,
    pub profile: Profile,
    pub notifications: NotificationConfig,
    /// Initial values for the in-memory meeting settings
    pub settings: MeetingSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://meet.example.com".to_string(),
            profile: Profile::default(),
            notifications: NotificationConfig::default(),
            settings: MeetingSettings::default(),
        }
    }
}

/// Who the local user is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub display_name: String,
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
        }
    }
}

/// Ceiling for either notification interval bound (one day).
const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Simulated notification feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub enabled: bool,
    /// Lower bound of the interval between notifications (seconds)
    pub min_interval_secs: u64,
    /// Upper bound of the interval between notifications (seconds)
    pub max_interval_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_interval_secs: 10,
            max_interval_secs: 15,
        }
    }
}

impl NotificationConfig {
    /// Interval bounds, swapped if configured backwards and kept within
    /// 1s..=1 day.
    pub fn interval_bounds(&self) -> (Duration, Duration) {
        let lo = self
            .min_interval_secs
            .min(self.max_interval_secs)
            .clamp(1, MAX_INTERVAL_SECS);
        let hi = self
            .min_interval_secs
            .max(self.max_interval_secs)
            .clamp(lo, MAX_INTERVAL_SECS);
        (Duration::from_secs(lo), Duration::from_secs(hi))
    }
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "meet-tui", "meet-tui")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from `path`, falling back to defaults if absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content).context("Failed to parse config file")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Pretty TOML for `meet-tui config`
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Media flags used when a meeting is opened directly by route
    pub fn join_preferences(&self) -> JoinPreferences {
        self.settings.join_preferences()
    }
}
