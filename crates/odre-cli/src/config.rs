//! Configuration of the `odre` binary.
//!
//! Stored as TOML in `~/.odre/config.toml`. Partial files are fine: every
//! unspecified value keeps its default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use odre_core::ParserOptions;
use odre_io::sink::{DEFAULT_API_VERSION, DEFAULT_GEO_DATA_URL};
use odre_io::sources::DEFAULT_OPEN_DATA_URL;
use odre_io::{GeoDataClient, OpenDataClient};
use serde::{Deserialize, Serialize};

/// Overrides `geo_data.base_url` when set.
pub const GEO_DATA_URL_ENV: &str = "ODRE_GEO_DATA_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OdreConfig {
    pub open_data: OpenDataConfig,
    pub geo_data: GeoDataConfig,
    pub parser: ParserOptions,
}

/// Where the public extracts are downloaded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenDataConfig {
    pub base_url: String,
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPEN_DATA_URL.to_string(),
        }
    }
}

/// Where reconstructed geometry is pushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoDataConfig {
    pub base_url: String,
    pub api_version: String,
}

impl Default for GeoDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEO_DATA_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl OdreConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".odre"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load `explicit` if given, else the default file if it exists, else defaults.
    /// The environment override is applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::load_from(&path)?,
                _ => Self::default(),
            },
        };
        if let Ok(url) = std::env::var(GEO_DATA_URL_ENV) {
            if !url.trim().is_empty() {
                config.geo_data.base_url = url;
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn open_data_client(&self) -> OpenDataClient {
        OpenDataClient::new(self.open_data.base_url.as_str())
    }

    pub fn geo_data_client(&self) -> GeoDataClient {
        GeoDataClient::new(
            self.geo_data.base_url.as_str(),
            self.geo_data.api_version.as_str(),
        )
    }
}
