//! HTTP handlers for Orders API

use axum::{
    Router,
    extract::State,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, AuthUser, JwtAuth, Role, RouteGuard, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_products::ProductRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{
    CategorySales, CreateOrder, Order, OrderStatus, OrderWithDetails, UpdateOrderStatus,
};
use crate::repository::OrderRepository;
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(create_order, list_orders, update_order_status),
    components(
        schemas(Order, OrderStatus, OrderWithDetails, CreateOrder, UpdateOrderStatus, CategorySales),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Orders", description = "Order placement and fulfilment")
    )
)]
pub struct ApiDoc;

type SharedService<O, P> = Arc<OrderService<O, P>>;

pub fn router<O, P>(service: OrderService<O, P>, auth: &JwtAuth) -> Router
where
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    let service = Arc::new(service);

    let authenticated = Router::new()
        .route("/", get(list_orders::<O, P>).post(create_order::<O, P>))
        .authenticated(auth)
        .with_state(service.clone());

    let admin = Router::new()
        .route("/{id}/status", patch(update_order_status::<O, P>))
        .restricted_to(Role::Admin, auth)
        .with_state(service);

    authenticated.merge(admin)
}

/// Place an order
#[utoipa::path(
    post,
    path = "",
    tag = "Orders",
    request_body = CreateOrder,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order created successfully", body = ApiResponse<Order>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_order<O: OrderRepository, P: ProductRepository>(
    State(service): State<SharedService<O, P>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateOrder>,
) -> OrderResult<ApiResponse<Order>> {
    let order = service.create_order(input, user.id).await?;
    Ok(ApiResponse::created(order).with_message("Order created successfully"))
}

/// List orders visible to the caller
#[utoipa::path(
    get,
    path = "",
    tag = "Orders",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All orders for admins, own orders otherwise", body = ApiResponse<Vec<OrderWithDetails>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<O: OrderRepository, P: ProductRepository>(
    State(service): State<SharedService<O, P>>,
    user: AuthUser,
) -> OrderResult<ApiResponse<Vec<OrderWithDetails>>> {
    let orders = service.list_orders(user).await?;
    Ok(ApiResponse::ok(orders))
}

/// Change an order's status
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderStatus,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order status updated", body = ApiResponse<OrderWithDetails>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_order_status<O: OrderRepository, P: ProductRepository>(
    State(service): State<SharedService<O, P>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateOrderStatus>,
) -> OrderResult<ApiResponse<OrderWithDetails>> {
    let order = service.update_status(id, input).await?;
    Ok(ApiResponse::ok(order).with_message("Order status updated"))
}
