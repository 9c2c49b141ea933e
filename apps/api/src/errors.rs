use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::statements::generator::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Generation(e) => match e {
                GenerationError::InvalidRequest(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                GenerationError::Provider(msg) => {
                    tracing::error!("Provider error: {msg}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_ERROR",
                        "Statement generation failed".to_string(),
                    )
                }
                GenerationError::Timeout => {
                    tracing::error!("Provider call timed out");
                    (
                        StatusCode::BAD_GATEWAY,
                        "PROVIDER_ERROR",
                        "Statement generation timed out".to_string(),
                    )
                }
                // Logged apart from Provider: these indicate prompt/contract
                // drift rather than an outage.
                GenerationError::MalformedResponse(msg) => {
                    tracing::error!("Malformed provider response: {msg}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_RESPONSE",
                        "Statement generation failed".to_string(),
                    )
                }
                GenerationError::CountMismatch { requested, actual } => {
                    tracing::error!(
                        "Statement count mismatch: requested {requested}, got {actual}"
                    );
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_RESPONSE",
                        "Statement generation failed".to_string(),
                    )
                }
            },
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
