//! Handler tests for the Users domain: register/login and the users router

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    auth: JwtAuth,
    service: UserService<InMemoryUserRepository>,
}

impl TestApp {
    fn new() -> Self {
        let auth = JwtAuth::new(&JwtConfig::new("users-handler-test-secret-0000000000"));
        let service = UserService::new(InMemoryUserRepository::new());
        let router = Router::new()
            .nest("/auth", auth_handlers::router(service.clone(), &auth))
            .nest("/users", handlers::router(service.clone(), &auth));
        Self {
            router,
            auth,
            service,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn register(&self, email: &str) -> (StatusCode, Value) {
        self.send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"username": "alice", "email": email, "password": "password123"})),
        )
        .await
    }

    async fn admin_token(&self) -> String {
        let admin = self
            .service
            .seed_admin(&AdminSeed {
                username: "root".into(),
                email: "root@shop.test".into(),
                password: "supersecret".into(),
            })
            .await
            .unwrap()
            .unwrap();
        self.auth.issue(admin.id, admin.role).unwrap()
    }
}

#[tokio::test]
async fn test_register_returns_user_and_token() {
    let app = TestApp::new();

    let (status, body) = app.register("alice@example.com").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["role"], "customer");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    let claims = app.auth.verify(body["data"]["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.role, Role::Customer);
    assert_eq!(claims.sub.to_string(), body["data"]["user"]["_id"].as_str().unwrap());
}

#[tokio::test]
async fn test_register_duplicate_email_is_400() {
    let app = TestApp::new();
    app.register("alice@example.com").await;

    let (status, body) = app.register("alice@example.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn test_register_short_password_is_400() {
    let app = TestApp::new();
    let (status, _) = app
        .send(
            "POST",
            "/auth/register",
            None,
            Some(json!({"username": "bob", "email": "bob@example.com", "password": "123"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = TestApp::new();
    app.register("alice@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_then_profile() {
    let app = TestApp::new();
    app.register("alice@example.com").await;

    let (status, body) = app
        .send(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "alice@example.com", "password": "password123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = app.send("GET", "/users/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_profile_requires_token() {
    let app = TestApp::new();
    let (status, body) = app.send("GET", "/users/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn test_customer_cannot_list_users() {
    let app = TestApp::new();
    let (_, body) = app.register("alice@example.com").await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, _) = app.send("GET", "/users", Some(&token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_promotes_customer() {
    let app = TestApp::new();
    let (_, body) = app.register("alice@example.com").await;
    let user_id = body["data"]["user"]["_id"].as_str().unwrap().to_string();
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{user_id}/role"),
            Some(&admin),
            Some(json!({"role": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role updated successfully");
    assert_eq!(body["data"]["role"], "admin");

    let (status, body) = app.send("GET", "/users", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_role_update_unknown_user_is_404() {
    let app = TestApp::new();
    let admin = app.admin_token().await;

    let (status, body) = app
        .send(
            "PATCH",
            &format!("/users/{}/role", Uuid::now_v7()),
            Some(&admin),
            Some(json!({"role": "admin"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}
