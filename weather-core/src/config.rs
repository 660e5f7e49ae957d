use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::provider::{
    AUTO_TIMEZONE,
    open_meteo::{ClientConfig, DEFAULT_BASE_URL},
};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://api.open-meteo.com/v1/forecast"
/// listen = "127.0.0.1:8080"
/// default_timezone = "auto"
/// request_timeout_secs = 30
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Forecast endpoint; the public Open-Meteo API when absent.
    pub base_url: Option<String>,

    /// Address the web server binds to.
    pub listen: Option<String>,

    /// Zone used when a request does not name one.
    pub default_timezone: Option<String>,

    /// Deadline for one incoming `/forecast` request, upstream call included.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn listen(&self) -> &str {
        self.listen.as_deref().unwrap_or(DEFAULT_LISTEN)
    }

    pub fn default_timezone(&self) -> &str {
        self.default_timezone.as_deref().unwrap_or(AUTO_TIMEZONE)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url().to_string(),
        }
    }

    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-forecast", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
