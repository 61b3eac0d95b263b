//! Public registration and login endpoints

use axum::{Router, extract::State, routing::post};
use axum_helpers::{
    ApiResponse, JwtAuth, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::repository::UserRepository;
use crate::service::UserService;

#[derive(OpenApi)]
#[openapi(
    paths(register, login),
    components(schemas(RegisterRequest, LoginRequest, AuthResponse)),
    tags(
        (name = "Auth", description = "Registration and login")
    )
)]
pub struct AuthApiDoc;

pub struct AuthState<R: UserRepository> {
    pub service: UserService<R>,
    pub jwt: JwtAuth,
}

impl<R: UserRepository> AuthState<R> {
    fn respond(&self, user: User) -> UserResult<AuthResponse> {
        let token = self.jwt.issue(user.id, user.role)?;
        Ok(AuthResponse {
            user: user.into(),
            token,
        })
    }
}

pub fn router<R: UserRepository + 'static>(service: UserService<R>, jwt: &JwtAuth) -> Router {
    let state = Arc::new(AuthState {
        service,
        jwt: jwt.clone(),
    });

    Router::new()
        .route("/register", post(register::<R>))
        .route("/login", post(login::<R>))
        .with_state(state)
}

/// Register a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = ApiResponse<AuthResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<ApiResponse<AuthResponse>> {
    let user = state.service.register(input).await?;
    let body = state.respond(user)?;
    Ok(ApiResponse::created(body).with_message("User registered successfully"))
}

/// Exchange credentials for a token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(state): State<Arc<AuthState<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<ApiResponse<AuthResponse>> {
    let user = state.service.login(input).await?;
    let body = state.respond(user)?;
    Ok(ApiResponse::ok(body).with_message("Login successful"))
}
