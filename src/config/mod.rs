// ABOUTME: Configuration management for the Aparcería client
// Backend endpoint, polling interval and UI preferences, persisted as TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod session;

pub use session::SessionFile;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "APARCERIA_API_URL";

/// Environment variable relocating the whole `~/.aparceria` tree
pub const HOME_ENV: &str = "APARCERIA_HOME";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How often the project board re-fetches, in seconds
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Show the key hint footer on the project board
    #[serde(default = "default_true")]
    pub show_help_footer: bool,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            show_help_footer: default_true(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_refresh_interval() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

/// Root of all client state (`~/.aparceria` unless `APARCERIA_HOME` is set)
pub fn base_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".aparceria"))
}

/// Directory holding config.toml and session.toml
pub fn config_dir() -> Result<PathBuf> {
    Ok(base_dir()?.join("config"))
}

impl AppConfig {
    /// Load configuration from the user config directory, then apply
    /// environment overrides. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = config_dir()?.join("config.toml");
        let mut config = Self::load_from(&path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path; missing file means defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to user config directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                tracing::debug!("Using API URL from {}: {}", API_URL_ENV, url);
                self.api.base_url = url;
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            api: ApiConfig::default(),
            ui: UiPreferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.api.refresh_interval_secs, 30);
        assert!(config.ui.show_help_footer);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[api]\nbase_url = \"https://aparceria.example\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "https://aparceria.example");
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config").join("config.toml");
        let mut config = AppConfig::default();
        config.api.refresh_interval_secs = 5;

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }
}
