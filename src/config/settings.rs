//! Application settings management
//!
//! This module defines the typed configuration structure for the service and
//! builds it from the schema-driven loader. Exactly one [`Settings`] instance
//! is constructed at process start; it is immutable afterwards and meant to
//! be passed by reference (or `Arc`) to every component that reads it, rather
//! than held in global state.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::config::schema::{self, Value};
use crate::config::{loader, validation};
use crate::utils::errors::{ConfigError, Result};

/// Main application configuration structure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub cors: CorsConfig,
    pub azure_ad: AzureAdConfig,
    pub azure_openai: AzureOpenAiConfig,
    pub sentinel: SentinelConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub conversation: ConversationConfig,
    pub logging: LoggingConfig,
    pub monitoring: MonitoringConfig,
    pub features: FeaturesConfig,
    pub testing: TestingConfig,
}

/// Application identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub name: String,
    pub version: String,
    pub description: String,
    pub environment: String,
    pub debug: bool,
}

/// HTTP server binding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
    pub reload: bool,
}

/// API routing configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiConfig {
    pub v1_prefix: String,
}

/// CORS policy configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorsConfig {
    pub origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

/// Azure AD identity configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzureAdConfig {
    pub tenant_id: String,
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
}

/// Azure OpenAI backend configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Microsoft Sentinel configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentinelConfig {
    pub workspace_id: String,
    pub log_analytics_endpoint: String,
}

/// Redis configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub ssl: bool,
    pub db: u32,
    pub max_connections: u32,
}

/// JWT verification parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JwtConfig {
    pub algorithm: String,
    pub audience: String,
    pub issuer: String,
    pub leeway_seconds: u64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub per_minute: u32,
    pub per_hour: u32,
}

/// Conversation tunables
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationConfig {
    pub timeout_minutes: u64,
    pub max_history: u32,
    pub max_message_length: u32,
    pub context_window_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitoringConfig {
    #[serde(skip_serializing)]
    pub app_insights_connection_string: Option<String>,
    pub metrics_enabled: bool,
    pub tracing_enabled: bool,
}

/// Feature flags configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeaturesConfig {
    pub websocket_enabled: bool,
}

/// Test overrides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestingConfig {
    pub mock_openai: bool,
    pub mock_sentinel: bool,
    pub test_mode: bool,
}

impl Settings {
    /// Load settings from the process environment plus the optional `.env`
    /// override file in the working directory.
    pub fn load() -> Result<Self> {
        let overrides = loader::read_override_file(Path::new(".env"))?;
        Self::from_env_map(&loader::process_env(), &overrides)
    }

    /// Build settings from explicit source maps.
    ///
    /// Entries in `env` win over entries in `overrides`. This is the
    /// injection point for tests: hand in synthetic maps instead of mutating
    /// the real environment.
    pub fn from_env_map(
        env: &HashMap<String, String>,
        overrides: &HashMap<String, String>,
    ) -> Result<Self> {
        let schema = schema::schema();
        let mut values = loader::load_values(&schema, env, overrides)?;
        validation::apply_validators(&mut values)?;
        let settings = Self::from_values(values)?;
        debug!(
            environment = %settings.app.environment,
            fields = schema.len(),
            "Configuration loaded"
        );
        Ok(settings)
    }

    fn from_values(values: HashMap<String, Value>) -> Result<Self> {
        let mut values = ValueMap(values);
        Ok(Self {
            app: AppConfig {
                name: values.take_str("APP_NAME")?,
                version: values.take_str("APP_VERSION")?,
                description: values.take_str("APP_DESCRIPTION")?,
                environment: values.take_str("ENVIRONMENT")?,
                debug: values.take_bool("DEBUG")?,
            },
            server: ServerConfig {
                host: values.take_str("HOST")?,
                port: values.take_u16("PORT")?,
                workers: values.take_u32("WORKERS")?,
                reload: values.take_bool("RELOAD")?,
            },
            api: ApiConfig {
                v1_prefix: values.take_str("API_V1_PREFIX")?,
            },
            cors: CorsConfig {
                origins: values.take_list("CORS_ORIGINS")?,
                allow_credentials: values.take_bool("CORS_ALLOW_CREDENTIALS")?,
                allow_methods: values.take_list("CORS_ALLOW_METHODS")?,
                allow_headers: values.take_list("CORS_ALLOW_HEADERS")?,
            },
            azure_ad: AzureAdConfig {
                tenant_id: values.take_str("AZURE_TENANT_ID")?,
                client_id: values.take_str("AZURE_CLIENT_ID")?,
                client_secret: values.take_str("AZURE_CLIENT_SECRET")?,
            },
            azure_openai: AzureOpenAiConfig {
                endpoint: values.take_str("AZURE_OPENAI_ENDPOINT")?,
                api_key: values.take_str("AZURE_OPENAI_API_KEY")?,
                deployment: values.take_str("AZURE_OPENAI_DEPLOYMENT")?,
                api_version: values.take_str("AZURE_OPENAI_API_VERSION")?,
                temperature: values.take_float("AZURE_OPENAI_TEMPERATURE")?,
                max_tokens: values.take_u32("AZURE_OPENAI_MAX_TOKENS")?,
            },
            sentinel: SentinelConfig {
                workspace_id: values.take_str("AZURE_WORKSPACE_ID")?,
                log_analytics_endpoint: values.take_str("AZURE_LOG_ANALYTICS_ENDPOINT")?,
            },
            redis: RedisConfig {
                host: values.take_str("REDIS_HOST")?,
                port: values.take_u16("REDIS_PORT")?,
                password: values.take_opt_str("REDIS_PASSWORD")?,
                ssl: values.take_bool("REDIS_SSL")?,
                db: values.take_u32("REDIS_DB")?,
                max_connections: values.take_u32("REDIS_MAX_CONNECTIONS")?,
            },
            jwt: JwtConfig {
                algorithm: values.take_str("JWT_ALGORITHM")?,
                audience: values.take_str("JWT_AUDIENCE")?,
                issuer: values.take_str("JWT_ISSUER")?,
                leeway_seconds: values.take_u64("JWT_LEEWAY")?,
            },
            rate_limit: RateLimitConfig {
                enabled: values.take_bool("RATE_LIMIT_ENABLED")?,
                per_minute: values.take_u32("RATE_LIMIT_PER_MINUTE")?,
                per_hour: values.take_u32("RATE_LIMIT_PER_HOUR")?,
            },
            conversation: ConversationConfig {
                timeout_minutes: values.take_u64("CONVERSATION_TIMEOUT_MINUTES")?,
                max_history: values.take_u32("MAX_CONVERSATION_HISTORY")?,
                max_message_length: values.take_u32("MAX_MESSAGE_LENGTH")?,
                context_window_size: values.take_u32("CONTEXT_WINDOW_SIZE")?,
            },
            logging: LoggingConfig {
                level: values.take_str("LOG_LEVEL")?,
                format: values.take_str("LOG_FORMAT")?,
            },
            monitoring: MonitoringConfig {
                app_insights_connection_string: values
                    .take_opt_str("APPLICATIONINSIGHTS_CONNECTION_STRING")?,
                metrics_enabled: values.take_bool("METRICS_ENABLED")?,
                tracing_enabled: values.take_bool("ENABLE_TRACING")?,
            },
            features: FeaturesConfig {
                websocket_enabled: values.take_bool("FEATURE_WEBSOCKET_ENABLED")?,
            },
            testing: TestingConfig {
                mock_openai: values.take_bool("MOCK_OPENAI")?,
                mock_sentinel: values.take_bool("MOCK_SENTINEL")?,
                test_mode: values.take_bool("TEST_MODE")?,
            },
        })
    }

    /// True when the environment name is "production", case-insensitively.
    /// Recomputed on each access, never cached.
    pub fn is_production(&self) -> bool {
        self.app.environment.eq_ignore_ascii_case("production")
    }

    /// True when the environment name is "development", case-insensitively.
    pub fn is_development(&self) -> bool {
        self.app.environment.eq_ignore_ascii_case("development")
    }

    /// Bind address for the HTTP listener.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl RedisConfig {
    /// Connection URL assembled from the individual fields.
    pub fn url(&self) -> String {
        let scheme = if self.ssl { "rediss" } else { "redis" };
        match &self.password {
            Some(password) => {
                format!("{}://:{}@{}:{}/{}", scheme, password, self.host, self.port, self.db)
            }
            None => format!("{}://{}:{}/{}", scheme, self.host, self.port, self.db),
        }
    }
}

/// Typed extraction from the loaded value map. Kind mismatches cannot happen
/// while the schema table and the struct fields agree; they surface as
/// `SchemaMismatch` rather than panicking.
struct ValueMap(HashMap<String, Value>);

impl ValueMap {
    fn take_str(&mut self, name: &'static str) -> Result<String> {
        match self.0.remove(name) {
            Some(Value::Str(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_opt_str(&mut self, name: &'static str) -> Result<Option<String>> {
        match self.0.remove(name) {
            Some(Value::OptionalStr(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_bool(&mut self, name: &'static str) -> Result<bool> {
        match self.0.remove(name) {
            Some(Value::Bool(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_int(&mut self, name: &'static str) -> Result<i64> {
        match self.0.remove(name) {
            Some(Value::Int(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_float(&mut self, name: &'static str) -> Result<f64> {
        match self.0.remove(name) {
            Some(Value::Float(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_list(&mut self, name: &'static str) -> Result<Vec<String>> {
        match self.0.remove(name) {
            Some(Value::StrList(v)) => Ok(v),
            _ => Err(ConfigError::SchemaMismatch(name)),
        }
    }

    fn take_u16(&mut self, name: &'static str) -> Result<u16> {
        let v = self.take_int(name)?;
        u16::try_from(v).map_err(|_| narrow_error(name, v, "u16"))
    }

    fn take_u32(&mut self, name: &'static str) -> Result<u32> {
        let v = self.take_int(name)?;
        u32::try_from(v).map_err(|_| narrow_error(name, v, "u32"))
    }

    fn take_u64(&mut self, name: &'static str) -> Result<u64> {
        let v = self.take_int(name)?;
        u64::try_from(v).map_err(|_| narrow_error(name, v, "u64"))
    }
}

fn narrow_error(field: &'static str, value: i64, target: &'static str) -> ConfigError {
    ConfigError::TypeCoercion {
        field: field.to_string(),
        raw: value.to_string(),
        target,
    }
}
