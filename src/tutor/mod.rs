//! Tutor - request handling core
//!
//! Implements the generate contract: credential check, body deserialization,
//! action validation, prompt construction, one upstream call.

pub mod templates;

use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::service::TextGenerator;

pub use templates::MAX_EDITAL_CHARS;

/// Closed enumeration of supported actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Weekly study schedule from the announcement text (default)
    Plano,
    /// 5-question multiple-choice quiz on a topic
    Quiz,
}

impl Action {
    /// Parse the request's `action` string; unknown values are rejected
    pub fn parse(s: &str) -> Result<Self, ApiError> {
        match s {
            "plano" => Ok(Self::Plano),
            "quiz" => Ok(Self::Quiz),
            _ => Err(ApiError::InvalidAction),
        }
    }
}

fn default_action() -> String {
    "plano".to_string()
}

fn default_topic() -> String {
    "Geral".to_string()
}

/// Incoming request payload
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Exam announcement text
    #[serde(default)]
    pub text: String,
    /// "plano" or "quiz"
    #[serde(default = "default_action")]
    pub action: String,
    /// Quiz topic, ignored for study schedules
    #[serde(default = "default_topic")]
    pub topic: String,
}

impl GenerateRequest {
    /// Build the prompt for this request's action
    pub fn build_prompt(&self) -> Result<String, ApiError> {
        let prompt = match Action::parse(&self.action)? {
            Action::Plano => templates::render_study_plan_prompt(&self.text)?,
            Action::Quiz => templates::render_quiz_prompt(&self.topic)?,
        };
        Ok(prompt)
    }
}

/// Request handling core, shared across connections
pub struct Tutor {
    /// `None` when the service started without a credential
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Tutor {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// Whether an upstream credential was available at startup
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Handle one generate request body, returning the Markdown result
    ///
    /// The credential check runs before the body is parsed, so a missing
    /// API key answers 500 even for garbage payloads.
    pub async fn generate(&self, body: &[u8]) -> Result<String, ApiError> {
        let generator = self.generator.as_ref().ok_or(ApiError::MissingApiKey)?;

        let request: GenerateRequest =
            serde_json::from_slice(body).map_err(|_| ApiError::InvalidBody)?;

        let prompt = request.build_prompt()?;
        info!(
            action = %request.action,
            prompt_chars = prompt.chars().count(),
            "Dispatching prompt to upstream"
        );

        match generator.generate(prompt).await {
            Ok(markdown) => Ok(markdown),
            Err(e) => {
                error!("Upstream generation failed: {}", e);
                Err(ApiError::Upstream(e))
            }
        }
    }
}
