use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid session ID")]
    SessionNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Interview already complete for session {0}")]
    InterviewComplete(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::SessionNotFound => "SESSION_NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InterviewComplete(_) => "INTERVIEW_COMPLETE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InterviewComplete(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::SessionNotFound => self.to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::InterviewComplete(_) => "Interview already complete".to_string(),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}
