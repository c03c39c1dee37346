//! Taskboard error types
//!
//! Uses `thiserror` for the crate-wide error enum. Lookups that miss are not
//! errors at the storage layer (they return `None`/`false`); handlers turn a
//! miss into `NotFound`, which the API maps to a 404 naming the id.

use std::io;
use thiserror::Error;

/// Taskboard error type
#[derive(Debug, Error)]
pub enum TaskboardError {
    /// I/O error (reading the config file, binding the listener)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Task does not exist
    #[error("Task with ID '{0}' not found")]
    NotFound(String),

    /// Priority string outside {low, medium, high} (strict mode only)
    #[error("Invalid priority '{0}': expected one of low, medium, high")]
    InvalidPriority(String),
}

/// Taskboard Result alias
pub type Result<T> = std::result::Result<T, TaskboardError>;

impl TaskboardError {
    /// Create a Config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a NotFound error for a task id
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TaskboardError::not_found("abc");
        assert_eq!(err.to_string(), "Task with ID 'abc' not found");

        let err = TaskboardError::config("port out of range");
        assert_eq!(err.to_string(), "Config error: port out of range");

        let err = TaskboardError::InvalidPriority("urgent".to_string());
        assert!(err.to_string().contains("urgent"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: TaskboardError = io_err.into();
        assert!(matches!(err, TaskboardError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: TaskboardError = toml_err.into();
        assert!(matches!(err, TaskboardError::TomlParse(_)));
    }
}
