//! Reusable OpenAPI response types for consistent API documentation.

use serde::Serialize;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::{ToResponse, ToSchema};

/// Documented shape of an error envelope
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status_code: u16,
    /// Validation details for 400 validation failures, otherwise null
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    pub message: String,
}

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 500,
        "data": null,
        "message": "Internal server error"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 400,
        "data": {
            "name": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "value": ""}
            }]
        },
        "message": "Request validation failed"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Business rule violated",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 400,
        "data": null,
        "message": "Insufficient stock"
    })
)]
pub struct BadRequestResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 404,
        "data": null,
        "message": "Product not found"
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - missing or invalid bearer token",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 401,
        "data": null,
        "message": "No token provided"
    })
)]
pub struct UnauthorizedResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Forbidden - role not allowed",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 403,
        "data": null,
        "message": "Admins only"
    })
)]
pub struct ForbiddenResponse(pub ErrorEnvelope);
