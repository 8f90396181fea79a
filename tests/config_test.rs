//! Tests for config module

use edital_tutor::config::{Config, ConfigOptions, DEFAULT_GEMINI_MODEL, DEFAULT_PORT};

#[test]
fn test_config_defaults() {
    let config = Config::new(Some("key".to_string()), ConfigOptions::default()).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("key"));
    assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
    assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn test_config_missing_key_is_allowed() {
    let config = Config::new(None, ConfigOptions::default()).unwrap();
    assert!(config.api_key.is_none());
}

#[test]
fn test_config_empty_key_treated_as_missing() {
    let config = Config::new(Some("".to_string()), ConfigOptions::default()).unwrap();
    assert!(config.api_key.is_none());
}

#[test]
fn test_config_removes_trailing_slash() {
    let config = Config::new(
        Some("key".to_string()),
        ConfigOptions {
            base_url: Some("https://example.com/".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.base_url, "https://example.com");
}

#[test]
fn test_config_empty_base_url_fails() {
    let result = Config::new(
        Some("key".to_string()),
        ConfigOptions {
            base_url: Some("   ".to_string()),
            ..Default::default()
        },
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("base_url"));
}

#[test]
fn test_config_blank_model_falls_back_to_default() {
    let config = Config::new(
        Some("key".to_string()),
        ConfigOptions {
            model: Some("  ".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
}

#[test]
fn test_config_model_override() {
    let config = Config::new(
        Some("key".to_string()),
        ConfigOptions {
            model: Some("gemini-1.5-pro".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.model, "gemini-1.5-pro");
}

#[test]
fn test_config_port_override() {
    let config = Config::new(
        Some("key".to_string()),
        ConfigOptions {
            port: Some(0),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(config.port, 0);
}
