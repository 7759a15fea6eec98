//src/config.rs
use crate::model::WeightUnit;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_CONFIG_DIR: &str = "set-logger";
const CONFIG_ENV_VAR: &str = "SET_LOGGER_CONFIG_DIR"; // Environment variable name
const BASE_URL_ENV_VAR: &str = "SET_LOGGER_BASE_URL";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine configuration directory.")]
    CannotDetermineConfigDir,
    #[error("I/O error accessing config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file (TOML): {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Failed to serialize config data (TOML): {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Service base URL is empty. Set 'base_url' in {0:?} or SET_LOGGER_BASE_URL.")]
    BaseUrlNotSet(PathBuf),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)] // Ensure defaults are used if fields are missing
pub struct Config {
    /// Root of the data service; operations are posted to `{base_url}/{operation}`.
    pub base_url: String,
    pub default_unit: WeightUnit,
    /// Re-apply the last table sort after every reload instead of resetting it.
    pub preserve_sort_on_reload: bool,
    pub table_visible: bool,
    /// Skip the end-of-session confirmation prompt.
    pub auto_confirm_end: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            default_unit: WeightUnit::Kilograms,
            preserve_sort_on_reload: true,
            table_visible: true,
            auto_confirm_end: false,
        }
    }
}

impl Config {
    /// Applies environment overrides on top of the file values.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV_VAR) {
            self.base_url = url;
        }
        self
    }

    /// # Errors
    /// Returns `Error::BaseUrlNotSet` when `base_url` is blank.
    pub fn require_base_url(&self, config_path: &Path) -> Result<&str, Error> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(Error::BaseUrlNotSet(config_path.to_path_buf()));
        }
        Ok(url)
    }
}

/// Determines the path to the configuration file.
/// # Errors
/// Fails if no config directory can be found or created.
pub fn get_config_path() -> Result<PathBuf, Error> {
    let config_dir_path = if let Ok(path_str) = std::env::var(CONFIG_ENV_VAR) {
        let path = PathBuf::from(path_str);
        if !path.is_dir() {
            warn!(
                "{} points to '{}', which is not a directory. Trying to create it.",
                CONFIG_ENV_VAR,
                path.display()
            );
            fs::create_dir_all(&path)?;
        }
        path
    } else {
        let base_config_dir = dirs::config_dir().ok_or(Error::CannotDetermineConfigDir)?;
        base_config_dir.join(APP_CONFIG_DIR)
    };

    if !config_dir_path.exists() {
        fs::create_dir_all(&config_dir_path)?;
    }

    Ok(config_dir_path.join(CONFIG_FILE_NAME))
}

/// Loads the configuration from the TOML file at the given path, writing
/// defaults out first if the file does not exist yet.
/// # Errors
/// Fails on IO or TOML errors.
pub fn load(config_path: &Path) -> Result<Config, Error> {
    if config_path.exists() {
        let config_content = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    } else {
        let default_config = Config::default();
        save(config_path, &default_config)?;
        Ok(default_config)
    }
}

/// Saves the configuration to the TOML file.
/// # Errors
/// Fails on IO or TOML errors.
pub fn save(config_path: &Path, config: &Config) -> Result<(), Error> {
    if let Some(parent_dir) = config_path.parent() {
        if !parent_dir.exists() {
            fs::create_dir_all(parent_dir)?;
        }
    }
    let config_content = toml::to_string_pretty(config)?;
    fs::write(config_path, config_content)?;
    Ok(())
}
