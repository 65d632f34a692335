use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised by the review pipeline itself.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{label} text is too short. Paste at least {min} characters (you pasted {actual}).")]
    InputTooShort {
        label: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{label} text is too long. Trim it to {max} characters or fewer (you pasted {actual}).")]
    InputTooLong {
        label: &'static str,
        max: usize,
        actual: usize,
    },

    /// The score card handed to the report builder does not cover the profile's dimensions.
    #[error("Malformed score card: {0}")]
    MalformedScoreCard(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Too many requests")]
    RateLimited,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Review(ReviewError::InputTooShort { .. }) => {
                (StatusCode::BAD_REQUEST, "INPUT_TOO_SHORT", self.to_string())
            }
            AppError::Review(ReviewError::InputTooLong { .. }) => {
                (StatusCode::BAD_REQUEST, "INPUT_TOO_LONG", self.to_string())
            }
            AppError::Review(e @ ReviewError::MalformedScoreCard(_)) => {
                tracing::error!("Review precondition violated: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Server error".to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMITED",
                "Too many requests. Wait a minute and try again.".to_string(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    "Review generation failed".to_string(),
                )
            }
            AppError::Render(e) => {
                tracing::error!("Review rendering failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Server error".to_string(),
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
