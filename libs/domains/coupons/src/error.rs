use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CouponError {
    #[error("Invalid coupon code: {0}")]
    NotFound(String),

    #[error("Coupon expired: {0}")]
    Expired(String),

    #[error("Coupon code '{0}' already exists")]
    DuplicateCode(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
}

pub type CouponResult<T> = Result<T, CouponError>;

impl From<CouponError> for AppError {
    fn from(err: CouponError) -> Self {
        match err {
            CouponError::NotFound(_) => AppError::NotFound("Invalid coupon code".to_string()),
            CouponError::Expired(_) => AppError::BadRequest("Coupon expired".to_string()),
            CouponError::DuplicateCode(_) => {
                AppError::BadRequest("Coupon code already exists".to_string())
            }
            CouponError::Validation(msg) => AppError::BadRequest(msg),
            CouponError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CouponError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
