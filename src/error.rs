//! Error taxonomy for the request handler
//!
//! Every failure maps to exactly one HTTP status and one JSON body with a
//! single `error` key. Nothing is retried.

use hyper::StatusCode;
use thiserror::Error;

/// Failures surfaced to the HTTP caller
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream credential missing from the environment
    #[error("API Key não configurada no servidor")]
    MissingApiKey,

    /// Request body was not valid JSON or had the wrong shape
    #[error("Body inválido")]
    InvalidBody,

    /// `action` field outside the closed enumeration
    #[error("Ação inválida")]
    InvalidAction,

    /// Endpoint called with a method other than POST
    #[error("Método não permitido")]
    MethodNotAllowed,

    /// The single upstream call failed (network, quota, malformed response)
    #[error("{0}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::InvalidAction => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MissingApiKey.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::InvalidBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidAction.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Upstream(anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ApiError::MissingApiKey.to_string(),
            "API Key não configurada no servidor"
        );
        assert_eq!(ApiError::InvalidBody.to_string(), "Body inválido");
        assert_eq!(ApiError::InvalidAction.to_string(), "Ação inválida");
        assert_eq!(
            ApiError::MethodNotAllowed.to_string(),
            "Método não permitido"
        );
    }

    #[test]
    fn test_upstream_message_is_stringified_source() {
        let err = ApiError::Upstream(anyhow!("Gemini API failed: 429 - quota"));
        assert_eq!(err.to_string(), "Gemini API failed: 429 - quota");
    }
}
