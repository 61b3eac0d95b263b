use chrono::{DateTime, Utc};
use domain_products::Product;
use domain_users::UserResponse;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

/// Order entity - stored in the `orders` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Product id
    pub product: Uuid,
    pub quantity: i32,
    /// Unit price at the time the order was placed
    pub price: f64,
    /// User id
    pub user: Uuid,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn new(product: &Product, quantity: i32, user: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            product: product.id,
            quantity,
            price: product.price,
            user,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Order with its product (and, for admins, its user) attached
///
/// `productDetails` is null when the product has since been deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithDetails {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub product: Uuid,
    pub quantity: i32,
    pub price: f64,
    pub user: Uuid,
    pub status: OrderStatus,
    #[serde(default)]
    pub product_details: Option<Product>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_details: Option<UserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderWithDetails {
    pub fn new(order: Order, product: Option<Product>, user: Option<UserResponse>) -> Self {
        Self {
            id: order.id,
            product: order.product,
            quantity: order.quantity,
            price: order.price,
            user: order.user,
            status: order.status,
            product_details: product,
            user_details: user,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Absent status keeps the current one
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatus {
    pub status: Option<OrderStatus>,
}

/// One row of the admin dashboard sales analytics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySales {
    /// Category name
    pub category: String,
    /// Units sold
    pub total_sales: i64,
    /// Rounded to cents
    pub revenue: f64,
}

impl CategorySales {
    pub fn new(category: String, total_sales: i64, revenue: f64) -> Self {
        Self {
            category,
            total_sales,
            revenue: round_cents(revenue),
        }
    }
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
