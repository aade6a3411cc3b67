//! Configuration file for the dataset tools.
//!
//! ```toml
//! [reader]
//! scan_frame_id = "laser"
//! assume_fov_deg = 180.0
//! ```
//!
//! Every section and key is optional; missing values take their defaults.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::io::carmen::ReaderOptions;

/// Config file searched when none is given on the command line.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["slam-datasets.toml", "/etc/slam-datasets.toml"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatasetsConfig {
    /// Log reader settings
    #[serde(default)]
    pub reader: ReaderOptions,
}

impl DatasetsConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load the first readable default config file, or defaults if none exists.
    pub fn load_default() -> Result<Self> {
        for candidate in DEFAULT_CONFIG_PATHS {
            let path = Path::new(candidate);
            if path.exists() {
                log::info!("Loaded config from {}", path.display());
                return Self::load(path);
            }
        }
        Ok(Self::default())
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml: &str) -> std::result::Result<Self, String> {
        basic_toml::from_str(toml).map_err(|e| e.to_string())
    }
}
