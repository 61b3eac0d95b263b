pub mod handlers;
pub mod responses;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Message returned for every 5xx; the real cause only goes to the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Error body, same envelope as successes with `success: false`.
///
/// ```json
/// { "success": false, "statusCode": 404, "data": null, "message": "Product not found" }
/// ```
pub type ErrorResponse = ApiResponse<Option<Value>>;

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this type; its `IntoResponse` is the single place
/// that turns a failure into the error envelope.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON extraction error: {0}")]
    JsonRejection(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::JsonRejection(e) => e.status(),
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, details) = match self {
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (msg, None)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                (msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                (msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (msg, None)
            }
            AppError::Validation(e) => {
                tracing::info!("Validation error: {:?}", e);
                (
                    "Request validation failed".to_string(),
                    serde_json::to_value(&e).ok(),
                )
            }
            AppError::JsonRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                (e.body_text(), None)
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (INTERNAL_ERROR_MESSAGE.to_string(), None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (INTERNAL_ERROR_MESSAGE.to_string(), None)
            }
        };

        ErrorResponse::new(status, details)
            .with_message(message)
            .into_response()
    }
}

/// Builds an error envelope outside of the `AppError` flow (fallbacks, layers).
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    ErrorResponse::new(status, None)
        .with_message(message)
        .into_response()
}
