use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use domain_categories::Category;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity - stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    /// Never negative
    pub stock: i32,
    /// Category id
    pub category: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product joined with its category, as returned by the listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductWithCategory {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub stock: i32,
    pub category: Uuid,
    pub category_details: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductWithCategory {
    pub fn new(product: Product, category: Category) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            stock: product.stock,
            category: product.category,
            category_details: category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i32,
    pub category: Uuid,
}

/// DTO for updating an existing product
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    pub category: Option<Uuid>,
}

impl Product {
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            price: input.price,
            stock: input.stock,
            category: input.category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, input: UpdateProduct) {
        if let Some(name) = input.name {
            self.name = name.trim().to_string();
        }
        if let Some(price) = input.price {
            self.price = price;
        }
        if let Some(stock) = input.stock {
            self.stock = stock;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        self.updated_at = Utc::now();
    }
}
