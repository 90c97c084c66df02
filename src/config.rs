//! Configuration file (`~/.ghostman/config.yaml`)

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_COLLECTION_PATH, DEFAULT_TIMEOUT_SECS, JSON_INDENT,
    MAX_RESPONSE_BYTES,
};
use crate::network::DispatchConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub collection: PathBuf,
    pub timeout_secs: u64,
    pub max_response_bytes: usize,
    pub json_indent: usize,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            collection: PathBuf::from(DEFAULT_COLLECTION_PATH),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_response_bytes: MAX_RESPONSE_BYTES,
            json_indent: JSON_INDENT,
            log: LogConfig::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. `warn` or `ghostman=debug`
    pub level: String,
    pub json: bool,
    /// Log file; stderr when unset
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
            json: true,
            file: None,
        }
    }
}

/// `<home>/.ghostman`, or `./.ghostman` without a home directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl Config {
    /// Load an explicit config file, or the default one if it exists.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Config::from_file(path),
            None => {
                let path = config_dir().join(CONFIG_FILE_NAME);
                if path.exists() {
                    Config::from_file(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn dispatch(&self) -> DispatchConfig {
        DispatchConfig {
            timeout: self.timeout(),
            max_body_bytes: self.max_response_bytes,
            json_indent: self.json_indent,
        }
    }
}
