use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_) => AppError::NotFound("Category not found".to_string()),
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
