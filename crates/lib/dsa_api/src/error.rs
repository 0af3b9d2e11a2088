//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dsa_core::chat::ChatError;
use dsa_core::grants::DatasetUnavailable;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Both variants answer 500 with a fixed detail string; the underlying
/// cause is only ever logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (error, detail) = match &self {
            AppError::DatasetUnavailable(_) => (
                "dataset_unavailable",
                "Failed to load grants data from db.json",
            ),
            AppError::Processing(_) => (
                "processing_error",
                "Error processing your request. Please try again later.",
            ),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            detail: detail.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<DatasetUnavailable> for AppError {
    fn from(e: DatasetUnavailable) -> Self {
        error!(path = %e.path.display(), "failed to load grants data");
        AppError::DatasetUnavailable(e.to_string())
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::DatasetUnavailable(e) => AppError::from(e),
            ChatError::Processing(msg) => AppError::Processing(msg),
        }
    }
}
