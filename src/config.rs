use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(default)]
    pub spans: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: OutputFormat::Json,
            pretty: true,
            spans: false,
        }
    }
}

/// Config file names probed, in order, when none is given explicitly.
pub const DEFAULT_PATHS: [&str; 2] = ["docmark.config.json", "config/docmark.config.json"];

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the first default config file found under `dir`, if any.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigError> {
        for name in DEFAULT_PATHS {
            let path = dir.join(name);
            if path.is_file() {
                log::debug!("using config {}", path.display());
                return Self::load(&path).map(Some);
            }
        }
        Ok(None)
    }
}
