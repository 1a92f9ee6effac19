//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {message}")]
    Read { path: String, message: String },

    /// TOML syntax or shape error.
    #[error("Invalid TOML config: {0}")]
    Toml(String),

    /// JSON syntax or shape error.
    #[error("Invalid JSON config: {0}")]
    Json(String),

    /// An endpoint template that needs an `{id}` placeholder lacks one.
    #[error("Endpoint '{name}' must contain an {{id}} placeholder: {template}")]
    MissingPlaceholder { name: &'static str, template: String },

    /// Serialization of the config failed.
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Toml(e.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}
