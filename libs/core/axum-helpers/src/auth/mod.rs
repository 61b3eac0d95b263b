//! Authentication and authorization module.
//!
//! This module provides:
//! - HS256 JWT issue/verify with a role claim
//! - Authentication middleware and a role guard for protected routes
//! - The [`AuthUser`] extractor for handlers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, Role, RouteGuard};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let admin = Router::new()
//!     .route("/categories", post(create))
//!     .restricted_to(Role::Admin, &auth);
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{AuthError, JwtAuth, JwtClaims, Role, TOKEN_TTL};
pub use middleware::{RouteGuard, bearer_token, jwt_auth_middleware, require_role};
pub use user::AuthUser;
