use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::source::weatherapi::DEFAULT_BASE_URL;

pub const ENV_API_KEY: &str = "WEATHERAPI_KEY";
pub const ENV_API_BASE_URL: &str = "WEATHERAPI_BASE_URL";
pub const ENV_BUCKET: &str = "AWS_BUCKET_NAME";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_CITY: &str = "CITY";

pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_REGION: &str = "us-west-2";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct WeatherApiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StorageSection {
    pub bucket: Option<String>,
    pub region: Option<String>,
}

/// Configuration stored on disk. Environment variables take precedence over it.
///
/// Example TOML:
/// ```toml
/// city = "London"
///
/// [weatherapi]
/// api_key = "..."
///
/// [storage]
/// bucket = "my-weather-bucket"
/// region = "us-west-2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub city: Option<String>,
    pub weatherapi: WeatherApiSection,
    pub storage: StorageSection,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-dashboard")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Everything needed to call the weather API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherApiSettings {
    pub api_key: String,
    pub base_url: String,
    pub city: String,
}

impl WeatherApiSettings {
    /// Merge CLI override, environment and file config, in that order of precedence.
    pub fn resolve(
        file: &Config,
        env: &dyn Fn(&str) -> Option<String>,
        city_override: Option<String>,
    ) -> Result<Self> {
        let api_key = pick(env(ENV_API_KEY), file.weatherapi.api_key.clone()).ok_or_else(|| {
            anyhow!(
                "No WeatherAPI key configured.\n\
                 Hint: set {ENV_API_KEY} or run `weather-dashboard configure`."
            )
        })?;

        let base_url = pick(env(ENV_API_BASE_URL), file.weatherapi.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let city = pick(city_override, pick(env(ENV_CITY), file.city.clone()))
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        Ok(Self { api_key, base_url, city })
    }
}

/// Fully resolved settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub weather: WeatherApiSettings,
    pub bucket: String,
    pub region: String,
}

impl PipelineConfig {
    pub fn resolve(
        file: &Config,
        env: &dyn Fn(&str) -> Option<String>,
        city_override: Option<String>,
    ) -> Result<Self> {
        let weather = WeatherApiSettings::resolve(file, env, city_override)?;

        let bucket = pick(env(ENV_BUCKET), file.storage.bucket.clone()).ok_or_else(|| {
            anyhow!(
                "No storage bucket configured.\n\
                 Hint: set {ENV_BUCKET} or run `weather-dashboard configure`."
            )
        })?;

        let region = pick(env(ENV_REGION), file.storage.region.clone())
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self { weather, bucket, region })
    }
}

/// Process environment lookup for [`PipelineConfig::resolve`].
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// First non-blank value, trimmed.
fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    primary
        .into_iter()
        .chain(fallback)
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
