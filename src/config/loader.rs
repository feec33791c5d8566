//! Schema-driven configuration loading
//!
//! This module resolves raw values for every schema field from the process
//! environment and the optional `.env` override file, then coerces them into
//! their declared kinds. Environment variables always win over file entries;
//! the loader never writes back to either source.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::config::schema::{FieldKind, FieldSpec, Value};
use crate::utils::errors::{ConfigError, Result};

/// Accepted boolean tokens, matched case-insensitively.
const TRUE_TOKENS: &[&str] = &["true", "1", "yes", "on"];
const FALSE_TOKENS: &[&str] = &["false", "0", "no", "off"];

/// Snapshot the process environment into a plain map.
pub fn process_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Parse a `.env`-style override file without touching the process environment.
///
/// A missing file is not an error and yields an empty map. The file handle is
/// released as soon as the iterator is drained.
pub fn read_override_file(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let mut overrides = HashMap::new();
    for entry in dotenv::from_path_iter(path)? {
        let (key, value) = entry?;
        overrides.insert(key, value);
    }
    debug!(
        path = %path.display(),
        entries = overrides.len(),
        "Loaded configuration override file"
    );
    Ok(overrides)
}

/// Resolve and coerce every schema field.
///
/// Lookup order per field: `env`, then `overrides`, then the declared
/// default. A required field with no source value aborts the whole load;
/// no partial result is ever returned.
pub fn load_values(
    schema: &[FieldSpec],
    env: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> Result<HashMap<String, Value>> {
    let mut values = HashMap::with_capacity(schema.len());
    for spec in schema {
        let value = match env.get(spec.name).or_else(|| overrides.get(spec.name)) {
            Some(raw) => coerce(spec, raw)?,
            None => match &spec.default {
                Some(default) => default.clone(),
                None => {
                    return Err(ConfigError::MissingRequiredField(spec.name.to_string()));
                }
            },
        };
        values.insert(spec.name.to_string(), value);
    }
    Ok(values)
}

/// Coerce a raw textual value into the field's declared kind.
pub fn coerce(spec: &FieldSpec, raw: &str) -> Result<Value> {
    match spec.kind {
        FieldKind::Str => Ok(Value::Str(raw.to_string())),
        FieldKind::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| coercion_error(spec.name, raw, "integer")),
        FieldKind::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| coercion_error(spec.name, raw, "float")),
        FieldKind::Bool => coerce_bool(spec.name, raw),
        FieldKind::StrList => coerce_list(spec.name, raw),
        FieldKind::OptionalStr => {
            // Empty value is the explicit unset marker; never coercion-fails.
            if raw.is_empty() {
                Ok(Value::OptionalStr(None))
            } else {
                Ok(Value::OptionalStr(Some(raw.to_string())))
            }
        }
    }
}

fn coerce_bool(field: &str, raw: &str) -> Result<Value> {
    let token = raw.trim().to_ascii_lowercase();
    if TRUE_TOKENS.contains(&token.as_str()) {
        Ok(Value::Bool(true))
    } else if FALSE_TOKENS.contains(&token.as_str()) {
        Ok(Value::Bool(false))
    } else {
        Err(coercion_error(field, raw, "boolean"))
    }
}

/// Two-branch list coercion: a value starting with `[` is parsed as a JSON
/// string array (structural passthrough); anything else is split on commas
/// with each element trimmed. Only a fully empty value yields the empty list.
fn coerce_list(field: &str, raw: &str) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::StrList(Vec::new()));
    }
    if trimmed.starts_with('[') {
        let items: Vec<String> =
            serde_json::from_str(trimmed).map_err(|_| coercion_error(field, raw, "list"))?;
        return Ok(Value::StrList(items));
    }
    Ok(Value::StrList(
        trimmed.split(',').map(|item| item.trim().to_string()).collect(),
    ))
}

fn coercion_error(field: &str, raw: &str, target: &'static str) -> ConfigError {
    ConfigError::TypeCoercion {
        field: field.to_string(),
        raw: raw.to_string(),
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn spec(kind: FieldKind) -> FieldSpec {
        FieldSpec::required("TEST_FIELD", kind, "test field")
    }

    #[test]
    fn test_bool_tokens() {
        for raw in ["true", "True", "TRUE", "1", "yes", "on"] {
            assert_eq!(coerce(&spec(FieldKind::Bool), raw).unwrap(), Value::Bool(true));
        }
        for raw in ["false", "False", "FALSE", "0", "no", "off"] {
            assert_eq!(coerce(&spec(FieldKind::Bool), raw).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn test_bool_rejects_other_tokens() {
        let err = coerce(&spec(FieldKind::Bool), "bogus").unwrap_err();
        assert_matches!(
            err,
            ConfigError::TypeCoercion { ref field, ref raw, target }
                if field == "TEST_FIELD" && raw == "bogus" && target == "boolean"
        );
    }

    #[test]
    fn test_int_and_float() {
        assert_eq!(coerce(&spec(FieldKind::Int), "42").unwrap(), Value::Int(42));
        assert_eq!(coerce(&spec(FieldKind::Int), " -7 ").unwrap(), Value::Int(-7));
        assert_eq!(coerce(&spec(FieldKind::Float), "0.7").unwrap(), Value::Float(0.7));
        assert_matches!(
            coerce(&spec(FieldKind::Int), "seven").unwrap_err(),
            ConfigError::TypeCoercion { target: "integer", .. }
        );
        assert_matches!(
            coerce(&spec(FieldKind::Float), "warm").unwrap_err(),
            ConfigError::TypeCoercion { target: "float", .. }
        );
    }

    #[test]
    fn test_list_comma_split_trims() {
        assert_eq!(
            coerce(&spec(FieldKind::StrList), "a, b ,c").unwrap(),
            Value::StrList(vec!["a".into(), "b".into(), "c".into()])
        );
    }

    #[test]
    fn test_list_empty_input() {
        assert_eq!(coerce(&spec(FieldKind::StrList), "").unwrap(), Value::StrList(vec![]));
    }

    #[test]
    fn test_list_keeps_interior_empties() {
        assert_eq!(
            coerce(&spec(FieldKind::StrList), "a,,b").unwrap(),
            Value::StrList(vec!["a".into(), String::new(), "b".into()])
        );
    }

    #[test]
    fn test_list_json_passthrough() {
        assert_eq!(
            coerce(&spec(FieldKind::StrList), r#"["http://a", "http://b"]"#).unwrap(),
            Value::StrList(vec!["http://a".into(), "http://b".into()])
        );
        assert_matches!(
            coerce(&spec(FieldKind::StrList), "[not json").unwrap_err(),
            ConfigError::TypeCoercion { target: "list", .. }
        );
    }

    #[test]
    fn test_optional_str_unset_marker() {
        assert_eq!(
            coerce(&spec(FieldKind::OptionalStr), "").unwrap(),
            Value::OptionalStr(None)
        );
        assert_eq!(
            coerce(&spec(FieldKind::OptionalStr), "secret").unwrap(),
            Value::OptionalStr(Some("secret".into()))
        );
    }

    #[test]
    fn test_missing_required_field() {
        let schema = vec![FieldSpec::required("NEEDED", FieldKind::Str, "must be set")];
        let err = load_values(&schema, &HashMap::new(), &HashMap::new()).unwrap_err();
        assert_matches!(err, ConfigError::MissingRequiredField(ref name) if name == "NEEDED");
    }

    #[test]
    fn test_default_fallback() {
        let schema = vec![FieldSpec::optional("TUNABLE", 12, "has a default")];
        let values = load_values(&schema, &HashMap::new(), &HashMap::new()).unwrap();
        assert_eq!(values["TUNABLE"], Value::Int(12));
    }

    #[test]
    fn test_env_wins_over_override() {
        let schema = vec![FieldSpec::optional("SOURCE", "default", "precedence probe")];
        let env = HashMap::from([("SOURCE".to_string(), "from-env".to_string())]);
        let overrides = HashMap::from([("SOURCE".to_string(), "from-file".to_string())]);

        let values = load_values(&schema, &env, &overrides).unwrap();
        assert_eq!(values["SOURCE"], Value::Str("from-env".into()));

        let values = load_values(&schema, &HashMap::new(), &overrides).unwrap();
        assert_eq!(values["SOURCE"], Value::Str("from-file".into()));
    }

    #[test]
    fn test_read_override_file_missing_is_empty() {
        let overrides = read_override_file(Path::new("does-not-exist.env")).unwrap();
        assert!(overrides.is_empty());
    }
}
