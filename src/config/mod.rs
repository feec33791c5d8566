//! Configuration management module
//!
//! This module handles loading, coercion, and validation of application
//! configuration from environment variables and an optional `.env` override
//! file, driven by a declarative field schema.

pub mod loader;
pub mod schema;
pub mod settings;
pub mod validation;

pub use schema::{FieldKind, FieldSpec, Value};
pub use settings::{
    ApiConfig, AppConfig, AzureAdConfig, AzureOpenAiConfig, ConversationConfig, CorsConfig,
    FeaturesConfig, JwtConfig, LoggingConfig, MonitoringConfig, RateLimitConfig, RedisConfig,
    SentinelConfig, ServerConfig, Settings, TestingConfig,
};
