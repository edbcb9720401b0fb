use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Every way a generation request can fail
///
/// Only request-shape problems get a 4xx; everything past the extractor is
/// reported as a 500 regardless of its cause.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Request body is malformed or lacks a string `prompt`
    #[error("{0}")]
    Validation(String),

    /// Request declared a non-JSON content type
    #[error("Unsupported Content-Type, expected: 'Content-Type: application/json'")]
    UnsupportedMediaType,

    /// Request body exceeded the size limit
    #[error("Request body is too large, limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Required provider credential is absent
    #[error("{0}")]
    Configuration(String),

    /// Provider answered but produced no text
    #[error("No response generated by the model")]
    EmptyGeneration,

    /// Transport failure, non-success status, or unreadable provider reply
    #[error("{provider} request failed: {message}")]
    Provider { provider: String, message: String },
}

impl GatewayError {
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.to_owned(),
            message: message.into(),
        }
    }

    /// HTTP status reported to the caller
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Configuration(_) | Self::EmptyGeneration | Self::Provider { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Uniform failure body: `{"detail": "..."}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub detail: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            detail: self.to_string(),
        };

        (self.status_code(), Json(envelope)).into_response()
    }
}
