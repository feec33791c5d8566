//! SCT Chatbot configuration
//!
//! Typed, validated runtime settings for the SCT chatbot microservice.
//! A declarative field schema drives a generic loader that reads the process
//! environment (plus an optional `.env` override file), coerces raw strings
//! into typed values, applies per-field validators, and produces a single
//! immutable [`Settings`] instance at process start. Construct it once in
//! `main` and pass it down explicitly; there is no global state.

pub mod config;
pub mod utils;

// Re-export commonly used types
pub use config::settings::Settings;
pub use utils::errors::{ConfigError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
