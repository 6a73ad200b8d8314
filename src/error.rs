//! Error types for notesd

use thiserror::Error;

/// Service-level error type (startup, configuration, serving)
#[derive(Error, Debug)]
pub enum CoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// API error
    #[error("API error: {0}")]
    Api(String),
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, CoreError>;
