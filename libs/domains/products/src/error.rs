use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_categories::CategoryError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<CategoryError> for ProductError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => ProductError::CategoryNotFound(id),
            CategoryError::Validation(msg) => ProductError::Validation(msg),
            CategoryError::Database(e) => ProductError::Database(e),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::CategoryNotFound(_) => {
                AppError::NotFound("Category not found".to_string())
            }
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
