//! HTTP handlers for Users API

use axum::{
    Router,
    extract::State,
    routing::{get, patch},
};
use axum_helpers::{
    ApiResponse, AuthUser, JwtAuth, Role, RouteGuard, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, ForbiddenResponse, InternalServerErrorResponse, NotFoundResponse,
        UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{UpdateRole, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(list_users, get_profile, update_role),
    components(
        schemas(UserResponse, UpdateRole),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Accounts and roles")
    )
)]
pub struct ApiDoc;

pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: &JwtAuth) -> Router {
    let service = Arc::new(service);

    let authenticated = Router::new()
        .route("/profile", get(get_profile::<R>))
        .authenticated(auth)
        .with_state(service.clone());

    let admin = Router::new()
        .route("/", get(list_users::<R>))
        .route("/{id}/role", patch(update_role::<R>))
        .restricted_to(Role::Admin, auth)
        .with_state(service);

    authenticated.merge(admin)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users, without password hashes", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<ApiResponse<Vec<UserResponse>>> {
    let users = service.list_users().await?;
    Ok(ApiResponse::ok(users.into_iter().map(UserResponse::from).collect()))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/profile",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = ApiResponse<UserResponse>),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_profile<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    user: AuthUser,
) -> UserResult<ApiResponse<UserResponse>> {
    let profile = service.get_user(user.id).await?;
    Ok(ApiResponse::ok(profile.into()))
}

/// Change a user's role
#[utoipa::path(
    patch,
    path = "/{id}/role",
    tag = "Users",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRole,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Role updated successfully", body = ApiResponse<UserResponse>),
        (status = 400, response = BadRequestResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_role<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateRole>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = service.update_role(id, input.role).await?;
    Ok(ApiResponse::ok(user.into()).with_message("Role updated successfully"))
}
