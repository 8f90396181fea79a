//! Gemini API client

use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::Config;

use super::{GenerateFuture, TextGenerator};

/// Request timeout for the single upstream call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiApiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiApiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

fn build_gemini_url(base_url: &str, model: &str) -> String {
    let base_url = base_url.trim_end_matches('/');
    let base_url = base_url.strip_suffix("/v1beta").unwrap_or(base_url);
    format!("{}/v1beta/models/{}:generateContent", base_url, model)
}

/// Map common authentication errors to consistent error messages
fn map_auth_error(status: u16) -> Option<anyhow::Error> {
    match status {
        401 => Some(anyhow!("Gemini API key invalid or expired")),
        403 => Some(anyhow!("Gemini access denied, API key may be disabled")),
        _ => None,
    }
}

/// Client for the Gemini generateContent endpoint
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from configuration; fails when no credential is set
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| anyhow!("API key is required to build a Gemini client"))?;

        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Call the Gemini API endpoint once with a single user turn
    async fn call_gemini_endpoint(&self, prompt: String) -> Result<String> {
        let payload = GeminiApiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart { text: prompt }],
            }],
        };

        let url = build_gemini_url(&self.base_url, &self.model);
        let start_time = Instant::now();

        info!("Calling Gemini API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Gemini API call completed in {}ms", duration_ms);

        match response {
            Ok(resp) => {
                let status = resp.status();
                let body_text = resp.text().await.unwrap_or_default();

                if let Some(err) = map_auth_error(status.as_u16()) {
                    return Err(err);
                }

                if !status.is_success() {
                    return Err(anyhow!("Gemini API failed: {} - {}", status, body_text));
                }

                let api_response: GeminiApiResponse = serde_json::from_str(&body_text)
                    .map_err(|e| anyhow!("Failed to parse Gemini response: {} - {}", e, body_text))?;

                let text = api_response
                    .candidates
                    .first()
                    .and_then(|c| c.content.parts.first())
                    .and_then(|p| p.text.clone())
                    .ok_or_else(|| anyhow!("Gemini API returned empty response"))?;

                Ok(text)
            }
            Err(e) => Err(anyhow!("Gemini API request failed: {}", e)),
        }
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: String) -> GenerateFuture<'_> {
        Box::pin(self.call_gemini_endpoint(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_gemini_url() {
        assert_eq!(
            build_gemini_url("https://generativelanguage.googleapis.com", "gemini-1.5-flash-001"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-001:generateContent"
        );
        assert_eq!(
            build_gemini_url("https://generativelanguage.googleapis.com/", "gemini-1.5-flash-001"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-001:generateContent"
        );
        assert_eq!(
            build_gemini_url(
                "https://generativelanguage.googleapis.com/v1beta",
                "gemini-1.5-flash-001"
            ),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-001:generateContent"
        );
    }

    #[test]
    fn test_client_requires_api_key() {
        use crate::config::{Config, ConfigOptions};

        let config = Config::new(None, ConfigOptions::default()).unwrap();
        assert!(GeminiClient::new(&config).is_err());
    }
}
