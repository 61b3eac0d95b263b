//! HTTP handlers for Coupons API

use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_helpers::{
    ApiResponse, JwtAuth, Role, RouteGuard, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CouponResult;
use crate::models::{Coupon, CouponDiscount, CreateCoupon};
use crate::repository::CouponRepository;
use crate::service::CouponService;

#[derive(OpenApi)]
#[openapi(
    paths(list_coupons, create_coupon, validate_coupon),
    components(
        schemas(Coupon, CreateCoupon, CouponDiscount),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Coupons", description = "Discount codes")
    )
)]
pub struct ApiDoc;

pub fn router<R: CouponRepository + 'static>(service: CouponService<R>, auth: &JwtAuth) -> Router {
    let service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_coupons::<R>))
        .route("/{code}/validate", get(validate_coupon::<R>))
        .with_state(service.clone());

    let admin = Router::new()
        .route("/", post(create_coupon::<R>))
        .restricted_to(Role::Admin, auth)
        .with_state(service);

    public.merge(admin)
}

/// List all coupons
#[utoipa::path(
    get,
    path = "",
    tag = "Coupons",
    responses(
        (status = 200, description = "All coupons", body = ApiResponse<Vec<Coupon>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_coupons<R: CouponRepository>(
    State(service): State<Arc<CouponService<R>>>,
) -> CouponResult<ApiResponse<Vec<Coupon>>> {
    Ok(ApiResponse::ok(service.list_coupons().await?))
}

/// Create a coupon
#[utoipa::path(
    post,
    path = "",
    tag = "Coupons",
    request_body = CreateCoupon,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Coupon created successfully", body = ApiResponse<Coupon>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_coupon<R: CouponRepository>(
    State(service): State<Arc<CouponService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCoupon>,
) -> CouponResult<ApiResponse<Coupon>> {
    let coupon = service.create_coupon(input).await?;
    Ok(ApiResponse::created(coupon).with_message("Coupon created successfully"))
}

/// Check a code; answers only with its discount
#[utoipa::path(
    get,
    path = "/{code}/validate",
    tag = "Coupons",
    params(("code" = String, Path, description = "Coupon code")),
    responses(
        (status = 200, description = "Coupon valid", body = ApiResponse<CouponDiscount>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn validate_coupon<R: CouponRepository>(
    State(service): State<Arc<CouponService<R>>>,
    Path(code): Path<String>,
) -> CouponResult<ApiResponse<CouponDiscount>> {
    let discount = service.validate_coupon(&code).await?;
    Ok(ApiResponse::ok(discount).with_message("Coupon valid"))
}
