//! HTTP handlers for Categories API

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
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

#[derive(OpenApi)]
#[openapi(
    paths(list_categories, create_category, update_category, delete_category),
    components(
        schemas(Category, CreateCategory, UpdateCategory),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Categories", description = "Product categories")
    )
)]
pub struct ApiDoc;

/// Listing is public; create/update/delete require an admin token.
pub fn router<R: CategoryRepository + 'static>(
    service: CategoryService<R>,
    auth: &JwtAuth,
) -> Router {
    let service = Arc::new(service);

    let public = Router::new()
        .route("/", get(list_categories::<R>))
        .with_state(service.clone());

    let admin = Router::new()
        .route("/", post(create_category::<R>))
        .route(
            "/{id}",
            patch(update_category::<R>).delete(delete_category::<R>),
        )
        .restricted_to(Role::Admin, auth)
        .with_state(service);

    public.merge(admin)
}

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "Categories",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<Category>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<ApiResponse<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(ApiResponse::ok(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "",
    tag = "Categories",
    request_body = CreateCategory,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Category created successfully", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<ApiResponse<Category>> {
    let category = service.create_category(input).await?;
    Ok(ApiResponse::created(category).with_message("Category created successfully"))
}

/// Rename a category
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategory,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<Category>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<ApiResponse<Category>> {
    let category = service.update_category(id, input).await?;
    Ok(ApiResponse::ok(category).with_message("Category updated successfully"))
}

/// Delete a category; products referencing it are left in place
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "Category ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Category deleted successfully"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    UuidPath(id): UuidPath,
) -> CategoryResult<ApiResponse<()>> {
    service.delete_category(id).await?;
    Ok(ApiResponse::ok(()).with_message("Category deleted successfully"))
}
