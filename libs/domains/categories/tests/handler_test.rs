//! Handler tests for the Categories domain
//!
//! Drive the router with `oneshot` over the in-memory repository and check
//! status codes, the response envelope and the admin guard.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_categories::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

fn auth() -> JwtAuth {
    JwtAuth::new(&JwtConfig::new("categories-handler-test-secret-000000"))
}

fn app(auth: &JwtAuth) -> (Router, InMemoryCategoryRepository) {
    let repo = InMemoryCategoryRepository::new();
    let service = CategoryService::new(repo.clone());
    (handlers::router(service, auth), repo)
}

fn admin_token(auth: &JwtAuth) -> String {
    auth.issue(Uuid::now_v7(), Role::Admin).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
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

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_admin_creates_category_returns_201_envelope() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);

    let (status, body) = send(&app, "POST", "/", Some(&token), Some(json!({"name": "Electronics"}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["statusCode"], 201);
    assert_eq!(body["message"], "Category created successfully");
    assert_eq!(body["data"]["name"], "Electronics");
    assert!(body["data"]["_id"].is_string());
}

#[tokio::test]
async fn test_list_is_public() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);
    send(&app, "POST", "/", Some(&token), Some(json!({"name": "Books"}))).await;

    let (status, body) = send(&app, "GET", "/", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert!(body.get("message").is_none());
}

#[tokio::test]
async fn test_customer_cannot_create() {
    let auth = auth();
    let (app, repo) = app(&auth);
    let token = auth.issue(Uuid::now_v7(), Role::Customer).unwrap();

    let (status, body) = send(&app, "POST", "/", Some(&token), Some(json!({"name": "Toys"}))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Admins only");
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_without_token_is_401() {
    let auth = auth();
    let (app, _) = app(&auth);

    let (status, body) = send(&app, "POST", "/", None, Some(json!({"name": "Toys"}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn test_blank_name_is_400() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);

    let (status, body) = send(&app, "POST", "/", Some(&token), Some(json!({"name": "  "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_update_and_delete_flow() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);

    let (_, created) = send(&app, "POST", "/", Some(&token), Some(json!({"name": "Electronics"}))).await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "PATCH", &format!("/{id}"), Some(&token), Some(json!({"name": "Gadgets"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category updated successfully");
    assert_eq!(body["data"]["name"], "Gadgets");

    let (status, body) = send(&app, "DELETE", &format!("/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category deleted successfully");
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_missing_category_is_404_for_update_and_delete() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);
    let id = Uuid::now_v7();

    let (status, body) = send(&app, "PATCH", &format!("/{id}"), Some(&token), Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");

    let (status, body) = send(&app, "DELETE", &format!("/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let auth = auth();
    let (app, _) = app(&auth);
    let token = admin_token(&auth);

    let (status, _) = send(&app, "DELETE", "/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
