//! Handler tests for the Products domain
//!
//! Router driven with `oneshot` over in-memory repositories.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_categories::{Category, CategoryRepository, CreateCategory, InMemoryCategoryRepository};
use domain_products::*;
use http_body_util::BodyExt;
use realtime::Broadcaster;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

struct TestApp {
    router: Router,
    categories: InMemoryCategoryRepository,
    products: InMemoryProductRepository,
    broadcaster: Broadcaster,
    admin_token: String,
}

impl TestApp {
    fn new() -> Self {
        let auth = JwtAuth::new(&JwtConfig::new("products-handler-test-secret-0000000"));
        let categories = InMemoryCategoryRepository::new();
        let products = InMemoryProductRepository::new(categories.clone());
        let broadcaster = Broadcaster::default();
        let service = ProductService::new(products.clone(), categories.clone(), broadcaster.clone());

        Self {
            router: handlers::router(service, &auth),
            categories,
            products,
            broadcaster,
            admin_token: auth.issue(Uuid::now_v7(), Role::Admin).unwrap(),
        }
    }

    async fn category(&self, name: &str) -> Category {
        self.categories
            .create(Category::new(CreateCategory {
                name: name.to_string(),
            }))
            .await
            .unwrap()
    }

    async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("authorization", format!("Bearer {}", self.admin_token));
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
}

#[tokio::test]
async fn test_create_product_returns_201() {
    let app = TestApp::new();
    let category = app.category("Electronics").await;

    let (status, body) = app
        .send(
            "POST",
            "/",
            Some(json!({"name": "Laptop", "price": 999.99, "stock": 5, "category": category.id})),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Product created successfully");
    assert_eq!(body["data"]["stock"], 5);
    assert_eq!(body["data"]["price"], 999.99);
}

#[tokio::test]
async fn test_create_with_missing_category_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            "POST",
            "/",
            Some(json!({"name": "Laptop", "price": 1.0, "category": Uuid::now_v7()})),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Category not found");
}

#[tokio::test]
async fn test_negative_stock_is_400() {
    let app = TestApp::new();
    let category = app.category("Electronics").await;

    let (status, _) = app
        .send(
            "POST",
            "/",
            Some(json!({"name": "Laptop", "price": 1.0, "stock": -1, "category": category.id})),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_includes_category_details() {
    let app = TestApp::new();
    let category = app.category("Electronics").await;
    app.send(
        "POST",
        "/",
        Some(json!({"name": "Laptop", "price": 999.99, "stock": 5, "category": category.id})),
    )
    .await;

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Products fetched with category details");
    assert_eq!(body["data"][0]["categoryDetails"]["name"], "Electronics");
}

#[tokio::test]
async fn test_stock_patch_publishes_stock_update() {
    let app = TestApp::new();
    let category = app.category("Electronics").await;
    let (_, created) = app
        .send(
            "POST",
            "/",
            Some(json!({"name": "Laptop", "price": 999.99, "stock": 5, "category": category.id})),
        )
        .await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();
    let mut rx = app.broadcaster.subscribe();

    let (status, body) = app
        .send("PATCH", &format!("/{id}"), Some(json!({"stock": 9})))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product updated successfully");

    let event = rx.recv().await.unwrap();
    assert_eq!(event.event, "stockUpdate");
    assert_eq!(event.room, format!("product_{id}"));
    assert_eq!(event.data["stock"], 9);
}

#[tokio::test]
async fn test_delete_then_delete_again_is_404() {
    let app = TestApp::new();
    let category = app.category("Electronics").await;
    let (_, created) = app
        .send(
            "POST",
            "/",
            Some(json!({"name": "Laptop", "price": 999.99, "category": category.id})),
        )
        .await;
    let id = created["data"]["_id"].as_str().unwrap().to_string();

    let (status, body) = app.send("DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, body) = app.send("DELETE", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");

    assert!(app.products.get_by_id(id.parse().unwrap()).await.unwrap().is_none());
}
