//! Application configuration.
//!
//! Settings are plain data structs with defaults matching the public
//! epigraphic endpoint, loadable from a JSON file for deployments that
//! point at their own store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// SPARQL endpoint configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    /// URL of the inscription store's SPARQL endpoint.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: "https://dydra.com/junjun7613/inscriptions_llm/sparql".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Inscription endpoint settings.
    pub endpoint: EndpointSettings,
    /// Layers hidden at startup (all layers are visible by default).
    pub hidden_layers: Vec<String>,
}

impl Settings {
    /// Load settings from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so a partial file like
    /// `{"endpoint": {"url": "..."}}` is valid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
