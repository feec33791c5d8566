//! Logging configuration and setup
//!
//! This module initializes tracing output according to the loaded settings:
//! LOG_LEVEL selects the filter, LOG_FORMAT selects JSON or plain text.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::LoggingConfig;
use crate::utils::errors::Result;

/// Map a canonical LOG_LEVEL token to a tracing filter directive.
/// LOG_LEVEL uses syslog-style names; WARNING and CRITICAL have no direct
/// tracing equivalent.
fn filter_directive(level: &str) -> &'static str {
    match level {
        "DEBUG" => "debug",
        "WARNING" => "warn",
        "ERROR" | "CRITICAL" => "error",
        _ => "info",
    }
}

/// Initialize logging based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::new(filter_directive(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stdout))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
            .init();
    }

    info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}
