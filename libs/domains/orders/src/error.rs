use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_categories::CategoryError;
use domain_products::ProductError;
use domain_users::UserError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {product_id}: requested {requested}")]
    InsufficientStock { product_id: Uuid, requested: i32 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    User(#[from] UserError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => AppError::NotFound("Order not found".to_string()),
            OrderError::ProductNotFound(_) => {
                AppError::NotFound("Product not found".to_string())
            }
            OrderError::InsufficientStock { .. } => {
                AppError::BadRequest("Insufficient stock".to_string())
            }
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(e) => AppError::Database(e),
            OrderError::Product(e) => e.into(),
            OrderError::Category(e) => e.into(),
            OrderError::User(e) => e.into(),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
