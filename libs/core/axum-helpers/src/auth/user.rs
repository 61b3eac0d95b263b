use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::jwt::{JwtClaims, Role};
use crate::errors::AppError;

/// Authenticated caller, inserted by `jwt_auth_middleware`.
///
/// Also usable directly as a handler argument; extraction fails with 401 when
/// the route is not behind the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<JwtClaims> for AuthUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_string()))
    }
}
