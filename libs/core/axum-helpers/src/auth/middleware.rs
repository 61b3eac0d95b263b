use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::{self, Next},
    response::Response,
};

use super::jwt::{JwtAuth, Role};
use super::user::AuthUser;
use crate::errors::AppError;

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware
///
/// Verifies the bearer token and inserts an [`AuthUser`] into the request
/// extensions. Missing token and invalid/expired token both answer 401.
///
/// ```ignore
/// let protected_routes = Router::new()
///     .route("/orders", get(list_orders))
///     .layer(axum::middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = {
        let token = bearer_token(request.headers()).ok_or_else(|| {
            tracing::debug!("No bearer token in Authorization header");
            AppError::Unauthorized("No token provided".to_string())
        })?;

        auth.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "JWT verification failed");
            AppError::Unauthorized("Invalid token".to_string())
        })?
    };

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Role guard, must run after [`jwt_auth_middleware`].
pub async fn require_role(
    State(required): State<Role>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let role = request.extensions().get::<AuthUser>().map(|user| user.role);

    match role {
        Some(role) if role == required => Ok(next.run(request).await),
        Some(role) => {
            tracing::debug!(%role, %required, "Role check failed");
            Err(AppError::Forbidden(forbidden_message(required).to_string()))
        }
        None => {
            tracing::warn!("Role check reached without an authenticated user");
            Err(AppError::Forbidden(forbidden_message(required).to_string()))
        }
    }
}

fn forbidden_message(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admins only",
        Role::Customer => "Customers only",
    }
}

/// Attach the auth guards to every route of a router.
///
/// `route_layer` only wraps matched routes, so unmatched paths still reach the
/// 404 fallback instead of answering 401.
pub trait RouteGuard {
    /// Any valid token.
    fn authenticated(self, auth: &JwtAuth) -> Self;
    /// Valid token whose role equals `role`.
    fn restricted_to(self, role: Role, auth: &JwtAuth) -> Self;
}

impl<S> RouteGuard for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn authenticated(self, auth: &JwtAuth) -> Self {
        self.route_layer(middleware::from_fn_with_state(
            auth.clone(),
            jwt_auth_middleware,
        ))
    }

    fn restricted_to(self, role: Role, auth: &JwtAuth) -> Self {
        // Layers run outermost-first: the token check wraps the role check
        self.route_layer(middleware::from_fn_with_state(role, require_role))
            .authenticated(auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{body::Body, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-long-enough-0000"))
    }

    fn app(auth: &JwtAuth) -> Router {
        let admin = Router::new()
            .route("/admin", get(|| async { "admin ok" }))
            .restricted_to(Role::Admin, auth);
        let me = Router::new()
            .route(
                "/me",
                get(|user: AuthUser| async move { user.role.to_string() }),
            )
            .authenticated(auth);
        Router::new().merge(admin).merge(me)
    }

    async fn call(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def"));
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let auth = auth();
        let (status, body) = call(app(&auth), "/admin", None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "No token provided");
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let auth = auth();
        let (status, body) = call(app(&auth), "/me", Some("garbage")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_customer_token_never_passes_admin_guard() {
        let auth = auth();
        let token = auth.issue(Uuid::now_v7(), Role::Customer).unwrap();
        let (status, body) = call(app(&auth), "/admin", Some(&token)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["statusCode"], 403);
        assert_eq!(body["message"], "Admins only");
    }

    #[tokio::test]
    async fn test_admin_token_passes_admin_guard() {
        let auth = auth();
        let token = auth.issue(Uuid::now_v7(), Role::Admin).unwrap();
        let response = app(&auth)
            .oneshot(
                axum::http::Request::builder()
                    .uri("/admin")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"admin ok");
    }

    #[tokio::test]
    async fn test_authenticated_route_exposes_user() {
        let auth = auth();
        let token = auth.issue(Uuid::now_v7(), Role::Customer).unwrap();
        let response = app(&auth)
            .oneshot(
                axum::http::Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"customer");
    }
}
