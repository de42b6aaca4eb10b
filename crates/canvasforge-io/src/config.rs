//! Engine defaults, loadable from a JSON file.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid engine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Defaults applied to request parameters the caller leaves out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub spacing: f64,
    pub pattern_count: usize,
    pub icon_size: f64,
    pub icon_color: String,
    pub palette: String,
    pub batch_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1200.0,
            canvas_height: 600.0,
            spacing: 20.0,
            pattern_count: 10,
            icon_size: 100.0,
            icon_color: "#2563eb".to_string(),
            palette: "vibrant".to_string(),
            batch_filter: "all".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }
}
