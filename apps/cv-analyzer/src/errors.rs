use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::skills::SkillSetError;
use crate::extraction::ExtractionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing input: {0}")]
    InputMissing(String),

    #[error("{0}")]
    EmptySkillSet(#[from] SkillSetError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InputMissing(_) | AppError::EmptySkillSet(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match &self {
            AppError::InputMissing(msg) => ("INPUT_MISSING", msg.clone()),
            AppError::EmptySkillSet(e) => ("EMPTY_SKILL_SET", e.to_string()),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    "EXTRACTION_ERROR",
                    "The uploaded file could not be read as a PDF".to_string(),
                )
            }
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
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
