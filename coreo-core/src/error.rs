//! Error types for the CloudCoreo CLI

use thiserror::Error;

/// Core error type for CloudCoreo operations
#[derive(Error, Debug)]
pub enum CoreoError {
    /// A required flag was not supplied
    #[error("{0}")]
    MissingFlag(String),

    /// Cloud provider other than AWS or Azure
    #[error("Provider not supported: {0} (must be AWS or Azure)")]
    ProviderNotSupported(String),

    /// Environment outside the allowed set
    #[error("Environment must be one of those: Production, Staging, Development, Test")]
    InvalidEnvironment(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for CloudCoreo operations
pub type Result<T> = std::result::Result<T, CoreoError>;

impl From<serde_json::Error> for CoreoError {
    fn from(err: serde_json::Error) -> Self {
        CoreoError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CoreoError {
    fn from(err: toml::de::Error) -> Self {
        CoreoError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreoError {
    fn from(err: toml::ser::Error) -> Self {
        CoreoError::Serialization(err.to_string())
    }
}
