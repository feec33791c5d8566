//! Utility modules
//!
//! This module contains the error taxonomy and the logging setup used by the
//! configuration layer and its host process.

pub mod errors;
pub mod logging;

pub use errors::{ConfigError, Result};
