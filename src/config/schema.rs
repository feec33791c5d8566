//! Configuration schema definition
//!
//! This module declares every configuration field the service reads, as an
//! explicit table of [`FieldSpec`] records. The loader interprets the table
//! generically, so adding a field here (plus its typed slot on `Settings`)
//! never requires touching the loader itself.

use serde::Serialize;

/// Declared type of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Str,
    Int,
    Float,
    Bool,
    StrList,
    OptionalStr,
}

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    StrList(Vec<String>),
    OptionalStr(Option<String>),
}

impl Value {
    /// The kind this value inhabits.
    pub fn kind(&self) -> FieldKind {
        match self {
            Value::Str(_) => FieldKind::Str,
            Value::Int(_) => FieldKind::Int,
            Value::Float(_) => FieldKind::Float,
            Value::Bool(_) => FieldKind::Bool,
            Value::StrList(_) => FieldKind::StrList,
            Value::OptionalStr(_) => FieldKind::OptionalStr,
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::StrList(v.into_iter().map(str::to_string).collect())
    }
}

/// Schema-level description of one configuration field.
///
/// The `name` is the exact environment variable key (case-sensitive).
/// A field without a default is required: loading fails if neither the
/// environment nor the override file supplies it.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl FieldSpec {
    /// A required field: no default, loading fails when absent.
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            default: None,
            description,
        }
    }

    /// An optional field; the kind is taken from the default value.
    pub fn optional(
        name: &'static str,
        default: impl Into<Value>,
        description: &'static str,
    ) -> Self {
        let default = default.into();
        Self {
            name,
            kind: default.kind(),
            default: Some(default),
            description,
        }
    }

    /// An optional-string field defaulting to unset.
    pub fn optional_str(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::OptionalStr,
            default: Some(Value::OptionalStr(None)),
            description,
        }
    }
}

/// The full configuration schema, in declaration order.
pub fn schema() -> Vec<FieldSpec> {
    vec![
        // Application
        FieldSpec::optional("APP_NAME", "sct-chatbot-service", "Application name"),
        FieldSpec::optional("APP_VERSION", "1.0.0", "Application version"),
        FieldSpec::optional(
            "APP_DESCRIPTION",
            "SCT Chatbot Microservice - AI-Powered Security Assistant",
            "Application description",
        ),
        FieldSpec::optional("ENVIRONMENT", "development", "Environment name"),
        FieldSpec::optional("DEBUG", false, "Debug mode"),
        // Server
        FieldSpec::optional("HOST", "0.0.0.0", "Server host"),
        FieldSpec::optional("PORT", 8000, "Server port"),
        FieldSpec::optional("WORKERS", 4, "Number of worker processes"),
        FieldSpec::optional("RELOAD", false, "Enable auto-reload"),
        // API
        FieldSpec::optional("API_V1_PREFIX", "/api/v1", "API version 1 prefix"),
        // CORS
        FieldSpec::optional(
            "CORS_ORIGINS",
            vec!["http://localhost:4200"],
            "Allowed CORS origins",
        ),
        FieldSpec::optional("CORS_ALLOW_CREDENTIALS", true, "Allow credentials"),
        FieldSpec::optional(
            "CORS_ALLOW_METHODS",
            vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"],
            "Allowed HTTP methods",
        ),
        FieldSpec::optional("CORS_ALLOW_HEADERS", vec!["*"], "Allowed headers"),
        // Azure AD
        FieldSpec::required("AZURE_TENANT_ID", FieldKind::Str, "Azure AD tenant ID"),
        FieldSpec::required("AZURE_CLIENT_ID", FieldKind::Str, "Azure AD client ID"),
        FieldSpec::required("AZURE_CLIENT_SECRET", FieldKind::Str, "Azure AD client secret"),
        // Azure OpenAI
        FieldSpec::required("AZURE_OPENAI_ENDPOINT", FieldKind::Str, "Azure OpenAI endpoint"),
        FieldSpec::required("AZURE_OPENAI_API_KEY", FieldKind::Str, "Azure OpenAI API key"),
        FieldSpec::optional("AZURE_OPENAI_DEPLOYMENT", "gpt-4o", "Model deployment name"),
        FieldSpec::optional(
            "AZURE_OPENAI_API_VERSION",
            "2024-02-15-preview",
            "Azure OpenAI API version",
        ),
        FieldSpec::optional("AZURE_OPENAI_TEMPERATURE", 0.7, "Model temperature"),
        FieldSpec::optional("AZURE_OPENAI_MAX_TOKENS", 2000, "Max tokens"),
        // Microsoft Sentinel
        FieldSpec::required("AZURE_WORKSPACE_ID", FieldKind::Str, "Log Analytics workspace ID"),
        FieldSpec::optional(
            "AZURE_LOG_ANALYTICS_ENDPOINT",
            "https://api.loganalytics.io/v1",
            "Log Analytics endpoint",
        ),
        // Redis
        FieldSpec::required("REDIS_HOST", FieldKind::Str, "Redis host"),
        FieldSpec::optional("REDIS_PORT", 6380, "Redis port"),
        FieldSpec::optional_str("REDIS_PASSWORD", "Redis password"),
        FieldSpec::optional("REDIS_SSL", true, "Use SSL for Redis"),
        FieldSpec::optional("REDIS_DB", 0, "Redis database number"),
        FieldSpec::optional("REDIS_MAX_CONNECTIONS", 50, "Max Redis connections"),
        // Security
        FieldSpec::optional("JWT_ALGORITHM", "RS256", "JWT algorithm"),
        FieldSpec::optional("JWT_AUDIENCE", "api://chatbot-service", "JWT audience"),
        FieldSpec::required("JWT_ISSUER", FieldKind::Str, "JWT issuer"),
        FieldSpec::optional("JWT_LEEWAY", 10, "JWT validation leeway in seconds"),
        // Rate limiting
        FieldSpec::optional("RATE_LIMIT_ENABLED", true, "Enable rate limiting"),
        FieldSpec::optional("RATE_LIMIT_PER_MINUTE", 60, "Requests per minute"),
        FieldSpec::optional("RATE_LIMIT_PER_HOUR", 1000, "Requests per hour"),
        // Conversation
        FieldSpec::optional(
            "CONVERSATION_TIMEOUT_MINUTES",
            60,
            "Conversation timeout in minutes",
        ),
        FieldSpec::optional(
            "MAX_CONVERSATION_HISTORY",
            100,
            "Max messages in conversation history",
        ),
        FieldSpec::optional("MAX_MESSAGE_LENGTH", 2000, "Max message length in characters"),
        FieldSpec::optional(
            "CONTEXT_WINDOW_SIZE",
            10,
            "Context window size for AI processing",
        ),
        // Logging
        FieldSpec::optional("LOG_LEVEL", "INFO", "Logging level"),
        FieldSpec::optional("LOG_FORMAT", "json", "Log format (json or text)"),
        // Monitoring
        FieldSpec::optional_str(
            "APPLICATIONINSIGHTS_CONNECTION_STRING",
            "Application Insights connection string",
        ),
        FieldSpec::optional("METRICS_ENABLED", true, "Enable metrics"),
        FieldSpec::optional("ENABLE_TRACING", true, "Enable distributed tracing"),
        // Feature flags
        FieldSpec::optional("FEATURE_WEBSOCKET_ENABLED", true, "Enable WebSocket support"),
        // Testing
        FieldSpec::optional("MOCK_OPENAI", false, "Mock Azure OpenAI for testing"),
        FieldSpec::optional("MOCK_SENTINEL", false, "Mock Sentinel for testing"),
        FieldSpec::optional("TEST_MODE", false, "Enable test mode"),
    ]
}
