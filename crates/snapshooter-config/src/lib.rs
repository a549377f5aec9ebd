pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing directly at a settings file
pub const CONFIG_PATH_ENV: &str = "SNAPSHOOTER_CONFIG_PATH";

const DEFAULT_REGION: &str = "fra1";
const DEFAULT_API_URL: &str = "https://api.digitalocean.com/v2";
const CANDIDATES: [&str; 2] = ["snapshooter.yaml", ".snapshooter.yaml"];

/// Optional settings; every key falls back to a default
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Region used for snapshot check droplets
    pub region: String,

    /// Base URL of the DigitalOcean API
    pub api_url: String,

    pub poll: PollSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            poll: PollSettings::default(),
        }
    }
}

/// Seconds between action status checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollSettings {
    pub action_secs: u64,
    pub snapshot_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            action_secs: 15,
            snapshot_secs: 30,
        }
    }
}

impl PollSettings {
    pub fn action_interval(&self) -> Duration {
        Duration::from_secs(self.action_secs)
    }

    pub fn snapshot_interval(&self) -> Duration {
        Duration::from_secs(self.snapshot_secs)
    }
}

impl Settings {
    fn validate(self) -> Result<Self> {
        if self.region.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                key: "region".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.poll.action_secs == 0 || self.poll.snapshot_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                key: "poll".to_string(),
                reason: "intervals must be at least one second".to_string(),
            });
        }
        Ok(self)
    }
}

/// Per-user settings directory (e.g. `~/.config/snapshooter`)
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("snapshooter"))
}

/// Locate the settings file, if there is one
///
/// Search order:
/// 1. `SNAPSHOOTER_CONFIG_PATH` (must exist when set)
/// 2. Current directory: `snapshooter.yaml`, `.snapshooter.yaml`
/// 3. `{config_dir}/snapshooter/config.yaml`
pub fn find_config_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::ConfigFileMissing(path));
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    if let Some(dir) = config_dir() {
        let global_config = dir.join("config.yaml");
        if global_config.exists() {
            return Ok(Some(global_config));
        }
    }

    Ok(None)
}

/// Load settings from the first file found, or defaults when there is none
pub fn load_settings() -> Result<Settings> {
    match find_config_file()? {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Load settings from a specific file
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    tracing::debug!("Loading settings from {}", path.display());

    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings =
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.validate()
}
