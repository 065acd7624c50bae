//! Client configuration.
//!
//! The config file only stores what the user chose with `configure`; the
//! effective [`Settings`] are resolved from flags, the environment variable,
//! the file and built-in defaults, in that order.

use crate::consts::cli_consts::polling;
use crate::environment::{Environment, InvalidEnvironment};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    /// Backend base URL, or "local".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    /// Dashboard refresh period in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,
}

/// Effective settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub environment: Environment,
    pub poll_interval: Duration,
}

impl Config {
    pub fn new(api_url: Option<String>, poll_interval_ms: Option<u64>) -> Self {
        Config {
            api_url,
            poll_interval_ms,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns an empty configuration.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Deletes the configuration file.
    ///
    /// Refuses any path that is not a `config.json`, and succeeds when there is nothing to delete.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if !path.ends_with("config.json") {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path must end with config.json",
            ));
        }
        if !path.exists() {
            println!("No config file found at {}", path.display());
            return Ok(());
        }
        fs::remove_file(path)
    }

    /// Resolves effective settings.
    ///
    /// Backend: flag, then environment variable, then file, then [`Environment::Local`].
    /// Interval: flag, then file, then the default; clamped to the minimum interval.
    pub fn resolve(
        &self,
        flag_api_url: Option<&str>,
        env_api_url: Option<&str>,
        flag_interval_ms: Option<u64>,
    ) -> Result<Settings, InvalidEnvironment> {
        let environment = match flag_api_url
            .or(env_api_url.filter(|s| !s.trim().is_empty()))
            .or(self.api_url.as_deref())
        {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };

        let interval_ms = flag_interval_ms
            .or(self.poll_interval_ms)
            .unwrap_or(polling::DASHBOARD_INTERVAL_MS)
            .max(polling::MIN_INTERVAL_MS);

        Ok(Settings {
            environment,
            poll_interval: Duration::from_millis(interval_ms),
        })
    }
}

/// Location of the config file: `~/.college-pulse/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home_path.join(".college-pulse").join("config.json"))
}
