//! Run configuration

use crate::dialect::{Dialect, DialectSetting};
use crate::error::{ParseError, Result};
use crate::parser::EmissionPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File extension of thread exports, without the dot
    pub extension: String,

    /// Marker vocabulary: a preset name or a full marker table
    pub dialect: DialectSetting,

    /// Which segments become records
    pub emission: EmissionPolicy,

    /// Parse sources on the rayon pool
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: "txt".to_string(),
            dialect: DialectSetting::default(),
            emission: EmissionPolicy::default(),
            parallel: true,
        }
    }
}

impl Config {
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect.resolve()
    }

    pub fn validate(&self) -> Result<()> {
        let ext = self.extension.as_str();
        if ext.is_empty() {
            return Err(ParseError::Config("extension must not be empty".into()));
        }
        if ext.contains(['/', '\\', '*', '?', '[', ']', '.']) {
            return Err(ParseError::Config(format!(
                "extension must be a bare suffix without dots, separators or wildcards: {ext}"
            )));
        }
        self.dialect().validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ParseError::Config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ParseError::Config(format!("Failed to serialize to TOML: {e}")))
    }

    /// Read and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}
