//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop services.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issue/verify, auth middleware, role guard, [`AuthUser`] extractor
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: [`AppError`] and the error envelope
//! - **[`response`]**: [`ApiResponse`] success envelope
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//! - **[`validation`]**: Shared validator rules
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use axum_helpers::http::cors_from_env;
//!
//! let router = create_router::<ApiDoc>(api_routes, cors_from_env(&environment)?);
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;
pub mod validation;

pub use auth::{
    AuthError, AuthUser, JwtAuth, JwtClaims, JwtConfig, Role, RouteGuard, TOKEN_TTL,
    jwt_auth_middleware, require_role,
};

pub use server::{
    API_PREFIX, HealthCheckFuture, HealthResponse, create_production_app, create_router,
    health_router, run_cleanup, run_health_checks, shutdown_signal,
};

pub use http::{cors_from_env, create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorResponse, error_response};

pub use response::ApiResponse;

pub use extractors::{UuidPath, ValidatedJson};
