//! Configuration validation module
//!
//! This module applies field-specific rules after coercion and before the
//! values are frozen into the settings instance: list normalization for the
//! CORS origins and canonical-case membership checks for enumerated fields.

use std::collections::HashMap;

use crate::config::schema::Value;
use crate::utils::errors::{ConfigError, Result};

/// Accepted LOG_LEVEL tokens, canonical uppercase form.
pub const LOG_LEVELS: &[&str] = &["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];

/// Accepted LOG_FORMAT tokens, canonical lowercase form.
pub const LOG_FORMATS: &[&str] = &["json", "text"];

/// A field-specific rule applied after coercion.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Strip surrounding whitespace from every list element.
    TrimmedList,
    /// Case-insensitive membership in a fixed set, normalized to uppercase.
    UppercaseEnum(&'static [&'static str]),
    /// Case-insensitive membership in a fixed set, normalized to lowercase.
    LowercaseEnum(&'static [&'static str]),
}

/// Validators in field-declaration order.
pub fn validators() -> Vec<(&'static str, Rule)> {
    vec![
        ("CORS_ORIGINS", Rule::TrimmedList),
        ("LOG_LEVEL", Rule::UppercaseEnum(LOG_LEVELS)),
        ("LOG_FORMAT", Rule::LowercaseEnum(LOG_FORMATS)),
    ]
}

/// Apply every validator to the coerced value map. The first failure aborts
/// the load.
pub fn apply_validators(values: &mut HashMap<String, Value>) -> Result<()> {
    for (field, rule) in validators() {
        if let Some(value) = values.get_mut(field) {
            apply_rule(field, rule, value)?;
        }
    }
    Ok(())
}

fn apply_rule(field: &'static str, rule: Rule, value: &mut Value) -> Result<()> {
    match (rule, value) {
        (Rule::TrimmedList, Value::StrList(items)) => {
            for item in items.iter_mut() {
                *item = item.trim().to_string();
            }
            Ok(())
        }
        (Rule::UppercaseEnum(allowed), Value::Str(token)) => {
            let canonical = token.to_uppercase();
            if allowed.contains(&canonical.as_str()) {
                *token = canonical;
                Ok(())
            } else {
                Err(invalid_enum(field, token, allowed))
            }
        }
        (Rule::LowercaseEnum(allowed), Value::Str(token)) => {
            let canonical = token.to_lowercase();
            if allowed.contains(&canonical.as_str()) {
                *token = canonical;
                Ok(())
            } else {
                Err(invalid_enum(field, token, allowed))
            }
        }
        _ => Err(ConfigError::SchemaMismatch(field)),
    }
}

fn invalid_enum(field: &str, value: &str, allowed: &'static [&'static str]) -> ConfigError {
    ConfigError::InvalidEnumValue {
        field: field.to_string(),
        value: value.to_string(),
        allowed,
    }
}
