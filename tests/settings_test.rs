//! Integration tests for settings loading
//!
//! Covers the two real source paths: the process environment (serialized,
//! because these tests mutate it) and the `.env` override file (backed by
//! temporary files). The synthetic-map unit tests live next to the code.

use std::collections::HashMap;
use std::io::Write;

use assert_matches::assert_matches;
use serial_test::serial;
use tempfile::NamedTempFile;

use sct_chatbot_config::config::loader;
use sct_chatbot_config::{ConfigError, Settings};

const REQUIRED: &[(&str, &str)] = &[
    ("AZURE_TENANT_ID", "tenant-1"),
    ("AZURE_CLIENT_ID", "client-1"),
    ("AZURE_CLIENT_SECRET", "s3cret"),
    ("AZURE_OPENAI_ENDPOINT", "https://openai.example"),
    ("AZURE_OPENAI_API_KEY", "key-1"),
    ("AZURE_WORKSPACE_ID", "workspace-1"),
    ("REDIS_HOST", "redis.example"),
    ("JWT_ISSUER", "https://issuer.example"),
];

fn base_env() -> HashMap<String, String> {
    REQUIRED
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn override_file(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp override file");
    for line in lines {
        writeln!(file, "{}", line).expect("write override line");
    }
    file
}

#[test]
fn test_override_file_supplies_missing_values() {
    let file = override_file(&[
        "JWT_ISSUER=https://file-issuer.example",
        "LOG_LEVEL=warning",
    ]);
    let overrides = loader::read_override_file(file.path()).unwrap();

    let mut env = base_env();
    env.remove("JWT_ISSUER");

    let settings = Settings::from_env_map(&env, &overrides).unwrap();
    assert_eq!(settings.jwt.issuer, "https://file-issuer.example");
    // Enum validation runs on file-sourced values too.
    assert_eq!(settings.logging.level, "WARNING");
}

#[test]
fn test_env_wins_over_override_file() {
    let file = override_file(&["JWT_ISSUER=https://file-issuer.example"]);
    let overrides = loader::read_override_file(file.path()).unwrap();

    let settings = Settings::from_env_map(&base_env(), &overrides).unwrap();
    assert_eq!(settings.jwt.issuer, "https://issuer.example");
}

#[test]
fn test_required_field_absent_everywhere() {
    let file = override_file(&["LOG_LEVEL=info"]);
    let overrides = loader::read_override_file(file.path()).unwrap();

    let mut env = base_env();
    env.remove("REDIS_HOST");

    let err = Settings::from_env_map(&env, &overrides).unwrap_err();
    assert_matches!(err, ConfigError::MissingRequiredField(ref name) if name == "REDIS_HOST");
}

#[test]
fn test_malformed_override_file() {
    let file = override_file(&["THIS IS NOT A KEY VALUE PAIR"]);
    let err = loader::read_override_file(file.path()).unwrap_err();
    assert_matches!(err, ConfigError::OverrideFile(_));
}

#[test]
fn test_json_list_in_override_file() {
    let file = override_file(&[r#"CORS_ORIGINS=["http://a.example", "http://b.example"]"#]);
    let overrides = loader::read_override_file(file.path()).unwrap();

    let settings = Settings::from_env_map(&base_env(), &overrides).unwrap();
    assert_eq!(settings.cors.origins, vec!["http://a.example", "http://b.example"]);
}

#[test]
#[serial]
fn test_load_from_process_environment() {
    for (key, value) in REQUIRED {
        std::env::set_var(key, value);
    }
    std::env::set_var("ENVIRONMENT", "Production");
    std::env::set_var("PORT", "9001");

    let first = Settings::load().unwrap();
    let second = Settings::load().unwrap();

    for (key, _) in REQUIRED {
        std::env::remove_var(key);
    }
    std::env::remove_var("ENVIRONMENT");
    std::env::remove_var("PORT");

    assert_eq!(first.azure_ad.tenant_id, "tenant-1");
    assert_eq!(first.server.port, 9001);
    assert!(first.is_production());
    assert!(!first.is_development());
    // Same unmodified environment, field-for-field equal instances.
    assert_eq!(first, second);
}

#[test]
#[serial]
fn test_load_fails_without_required_fields() {
    for (key, _) in REQUIRED {
        std::env::remove_var(key);
    }
    let err = Settings::load().unwrap_err();
    assert_matches!(err, ConfigError::MissingRequiredField(_));
}
