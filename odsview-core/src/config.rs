//! Configuration for the converter and the server (`odsview.toml`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::extract::EmptySheetPolicy;

/// File looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_FILE: &str = "odsview.toml";

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdsViewConfig {
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl OdsViewConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: OdsViewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else `odsview.toml` from the working directory if it
    /// exists, else the defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            log::debug!("Using config from {}", default_path.display());
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.workers == 0 {
            return Err(ConfigError::Invalid(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings of the file converter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ConvertConfig {
    /// Sheets without significant rows still get a heading and an empty table
    pub empty_sheets: EmptySheetPolicy,
    /// Escape cell text in HTML output
    pub escape_html: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            empty_sheets: EmptySheetPolicy::Keep,
            escape_html: true,
        }
    }
}

/// Settings of the HTTP server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Directory served for every path other than the conversion endpoint
    pub static_dir: PathBuf,
    /// Where uploads are staged; the system temp dir when unset
    pub temp_dir: Option<PathBuf>,
    pub max_upload_bytes: usize,
    pub workers: usize,
    pub empty_sheets: EmptySheetPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            static_dir: PathBuf::from("."),
            temp_dir: None,
            max_upload_bytes: 50 * 1024 * 1024,
            workers: 1,
            empty_sheets: EmptySheetPolicy::Omit,
        }
    }
}
