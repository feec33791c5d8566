//! Error handling for the configuration layer
//!
//! This module defines the error taxonomy for loading and validating
//! configuration. Every variant is fatal at startup: the hosting process
//! must abort rather than continue with a partial configuration.

use thiserror::Error;

/// Configuration loading and validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration field: {0}")]
    MissingRequiredField(String),

    #[error("Cannot coerce {field}={raw:?} to {target}")]
    TypeCoercion {
        field: String,
        raw: String,
        target: &'static str,
    },

    #[error("Invalid value {value:?} for {field}: must be one of {allowed:?}")]
    InvalidEnumValue {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("Configuration override file error: {0}")]
    OverrideFile(#[from] dotenv::Error),

    #[error("Schema kind mismatch for field {0}")]
    SchemaMismatch(&'static str),
}

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
