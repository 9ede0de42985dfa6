//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use linkwise_core::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pipeline settings
    pub api: ClientConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Logging settings read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level used when neither `-v` nor `RUST_LOG` is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
            if !matches!(ext, "yaml" | "yml" | "json") {
                return Err(Error::config(format!(
                    "Unsupported configuration file extension '.{}' for {}",
                    ext,
                    path.display()
                )));
            }
        }

        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "Loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations,
    /// then apply environment overrides
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        let mut config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::load()?,
        };
        config.api.merge_with_env();
        Ok(config)
    }

    /// Configuration file paths that are checked, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".linkwise.yaml"),
            PathBuf::from(".linkwise.yml"),
            PathBuf::from(".linkwise.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let linkwise_dir = config_dir.join("linkwise");
            paths.push(linkwise_dir.join("config.yaml"));
            paths.push(linkwise_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".linkwise.yaml"));
            paths.push(home_dir.join(".linkwise.json"));
        }

        paths
    }

    /// Pipeline settings with command-line overrides applied
    pub fn client_config(&self, api_host: Option<&str>, no_cache: bool) -> ClientConfig {
        let mut client = self.api.clone();
        if let Some(host) = api_host {
            client.api_host = host.to_string();
        }
        if no_cache {
            client.cache.enabled = false;
        }
        client
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}
