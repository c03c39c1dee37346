//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{load_toml, taskboard_dir};
use crate::error::{Result, TaskboardError};

/// Default port for the API server
pub const DEFAULT_PORT: u16 = 8000;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Frontend bundle to serve for non-API paths
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

/// Task handling policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TasksConfig {
    /// Reject unknown priority strings with a validation error instead of
    /// defaulting (create) or ignoring them (update)
    #[serde(default)]
    pub strict_priority: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "taskboard=info,tower_http=info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

/// Default config file path
pub fn config_path() -> PathBuf {
    taskboard_dir().join("config.toml")
}

/// Load configuration from `path`, or the default location when `None`.
///
/// A missing file yields the defaults. A file that exists but cannot be read
/// or parsed is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
    if !path.exists() {
        return Ok(Config::default());
    }
    let config: Config = load_toml(&path)?;
    if config.server.host.trim().is_empty() {
        return Err(TaskboardError::config(format!(
            "{}: server.host must not be empty",
            path.display()
        )));
    }
    Ok(config)
}

/// Render the configuration as TOML
pub fn to_toml(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config)?)
}
