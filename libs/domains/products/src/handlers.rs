//! HTTP handlers for Products API

use axum::{
    Router,
    extract::State,
    routing::{get, patch, post},
};
use axum_helpers::{
    ApiResponse, JwtAuth, Role, RouteGuard, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use domain_categories::CategoryRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, ProductWithCategory, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, create_product, update_product, delete_product),
    components(
        schemas(Product, ProductWithCategory, CreateProduct, UpdateProduct),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalogue and stock")
    )
)]
pub struct ApiDoc;

type SharedService<R, C> = Arc<ProductService<R, C>>;

/// Create the products router: public listing, admin-only mutations
pub fn router<R, C>(service: ProductService<R, C>, auth: &JwtAuth) -> Router
where
    R: ProductRepository + 'static,
    C: CategoryRepository + 'static,
{
    let shared_service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_products::<R, C>))
        .with_state(shared_service.clone());

    let admin = Router::new()
        .route("/", post(create_product::<R, C>))
        .route(
            "/{id}",
            patch(update_product::<R, C>).delete(delete_product::<R, C>),
        )
        .restricted_to(Role::Admin, auth)
        .with_state(shared_service);

    public.merge(admin)
}

/// List products with their category details
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Products fetched with category details", body = ApiResponse<Vec<ProductWithCategory>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<R, C>>,
) -> ProductResult<ApiResponse<Vec<ProductWithCategory>>> {
    let products = service.list_products().await?;
    Ok(ApiResponse::ok(products).with_message("Products fetched with category details"))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<R, C>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.create_product(input).await?;
    Ok(ApiResponse::created(product).with_message("Product created successfully"))
}

/// Update a product; setting `stock` notifies the product room
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProduct,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<Product>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<R, C>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<ApiResponse<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(ApiResponse::ok(product).with_message("Product updated successfully"))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, C: CategoryRepository>(
    State(service): State<SharedService<R, C>>,
    UuidPath(id): UuidPath,
) -> ProductResult<ApiResponse<()>> {
    service.delete_product(id).await?;
    Ok(ApiResponse::ok(()).with_message("Product deleted successfully"))
}
