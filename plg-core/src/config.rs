/// Importer configuration
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::{ObjectLimits, RadiusMode};
use crate::reader::DEFAULT_MAX_LINE_LENGTH;

/// Settings shared by every import made through one [`Importer`](crate::Importer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    /// Longest physical line read in one go, terminator included
    pub max_line_length: usize,
    pub radius_mode: RadiusMode,
    pub limits: ObjectLimits,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            radius_mode: RadiusMode::default(),
            limits: ObjectLimits::default(),
        }
    }
}

impl ImporterConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}
