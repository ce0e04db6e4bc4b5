use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::endpoints;
use crate::stations::{StationRegistry, StationSpec};

pub const CONFIG_FILE: &str = "config.toml";

/// How reports are pulled from upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// One request for every station
    #[default]
    Batch,
    /// One concurrent request per station
    PerStation,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetchConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub mode: FetchMode,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
            mode: FetchMode::Batch,
        }
    }
}

fn default_base_url() -> String { endpoints::AVIATION_WEATHER_API.to_string() }
fn default_user_agent() -> String { "metar-temps/0.1.0".to_string() }
fn default_timeout() -> u64 { 15 }

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Overrides the built-in airport list when non-empty
    #[serde(default)]
    pub stations: Vec<StationSpec>,
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    /// `METAR_API_URL` in the environment overrides the configured base URL.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            Self::from_toml(&data)?
        } else {
            Self::default()
        };

        if let Ok(url) = std::env::var("METAR_API_URL") {
            if !url.is_empty() {
                config.fetch.base_url = url;
            }
        }

        Ok(config)
    }

    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).context("Failed to parse config")
    }

    pub fn registry(&self) -> Result<StationRegistry> {
        if self.stations.is_empty() {
            return Ok(StationRegistry::default());
        }
        StationRegistry::new(self.stations.clone()).context("Invalid station list in config")
    }
}
