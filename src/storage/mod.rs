pub mod config;
pub mod tasks;

use std::path::{Path, PathBuf};

use crate::error::{Result, TaskboardError};

/// ~/.taskboard/ directory path (falls back to ./.taskboard without a home dir)
pub fn taskboard_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskboard")
}

/// Deserialize a TOML file
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(TaskboardError::from)
}
