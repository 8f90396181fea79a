//! Configuration module - CLI arguments and settings

use std::sync::Arc;

use anyhow::{anyhow, Result};

/// Environment variable holding the Gemini API key
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Default Gemini API base URL
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Fixed text-generation model variant used by the service
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-001";

/// Default port the HTTP server binds to
pub const DEFAULT_PORT: u16 = 8787;

/// Optional configuration parameters for Config::new()
#[derive(Debug, Clone, Default)]
pub struct ConfigOptions {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub port: Option<u16>,
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential. `None` when the environment variable is absent or
    /// blank; requests are then answered with a configuration error instead
    /// of failing startup.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    /// Create a new Config with an optional API key plus optional overrides
    pub fn new(api_key: Option<String>, options: ConfigOptions) -> Result<Arc<Self>> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        // Remove trailing slash
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(anyhow!("base_url cannot be empty"));
        }

        let model = match options.model {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    DEFAULT_GEMINI_MODEL.to_string()
                } else {
                    trimmed.to_string()
                }
            }
            None => DEFAULT_GEMINI_MODEL.to_string(),
        };

        Ok(Arc::new(Self {
            api_key,
            base_url,
            model,
            port: options.port.unwrap_or(DEFAULT_PORT),
        }))
    }

    /// Read the upstream credential from the process environment
    pub fn api_key_from_env() -> Option<String> {
        std::env::var(ENV_GEMINI_API_KEY).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_treated_as_missing() {
        let config = Config::new(Some("   ".to_string()), ConfigOptions::default()).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_api_key_trimmed() {
        let config = Config::new(Some(" key-123 ".to_string()), ConfigOptions::default()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("key-123"));
    }
}
