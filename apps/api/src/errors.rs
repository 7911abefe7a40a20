use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dataset::DatasetError;
use crate::recommend::CriteriaError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// "No vehicles matched" is not an error; see `recommend::Recommendation::NoMatches`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CriteriaError> for AppError {
    fn from(err: CriteriaError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Dataset(DatasetError::NotFound(path)) => {
                tracing::error!("Dataset not found at: {}", path.display());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATASET_NOT_FOUND",
                    "The vehicle dataset is not available".to_string(),
                )
            }
            AppError::Dataset(e) => {
                tracing::error!("Dataset error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATASET_ERROR",
                    "The vehicle dataset could not be read".to_string(),
                )
            }
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
