// src/config/mod.rs
pub mod types;

pub use self::types::{AnalysisConfig, Config, SelectionConfig, SnapshotConfig};

use crate::error::{Result, ScoutError};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "labelscout.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `labelscout.toml` from the working directory, or defaults if
    /// there is none.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ScoutError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::parse_toml(&content)
    }

    /// # Errors
    /// Returns `Config` if the TOML is invalid or fails validation.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ScoutError::Config(format!("{CONFIG_FILE}: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns `Config` if the marker label is blank or the confidence
    /// default lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.cluster_label.trim().is_empty() {
            return Err(ScoutError::Config(
                "analysis.cluster_label must not be empty".to_string(),
            ));
        }
        let min = self.selection.min_confidence;
        if !(0.0..=1.0).contains(&min) {
            return Err(ScoutError::Config(format!(
                "selection.min_confidence must be within [0, 1], got {min}"
            )));
        }
        Ok(())
    }

    /// Serializes the configuration for `labelscout.toml`.
    ///
    /// # Errors
    /// Returns `Config` if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScoutError::Config(e.to_string()))
    }
}
