use async_trait::async_trait;
use domain_categories::CategoryRepository;
use domain_products::ProductRepository;
use domain_users::{UserRepository, UserResponse};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CategorySales, Order, OrderStatus, OrderWithDetails};

/// Repository trait for Order persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> OrderResult<Order>;

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>>;

    /// Replace an existing order
    async fn update(&self, order: Order) -> OrderResult<Order>;

    /// Orders oldest first with product details attached.
    ///
    /// `Some(user)` restricts to that user's orders and leaves out user
    /// details; `None` returns every order with its user attached.
    async fn list_with_details(&self, user: Option<Uuid>) -> OrderResult<Vec<OrderWithDetails>>;

    /// Completed orders grouped by category name, sorted by name.
    /// Orders whose product or category no longer exists are not counted.
    async fn sales_by_category(&self) -> OrderResult<Vec<CategorySales>>;
}

/// In-memory implementation of OrderRepository (for development/testing)
///
/// Joins go through the other domains' repositories.
#[derive(Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<Uuid, Order>>>,
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl InMemoryOrderRepository {
    pub fn new(
        products: impl ProductRepository + 'static,
        categories: impl CategoryRepository + 'static,
        users: impl UserRepository + 'static,
    ) -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            products: Arc::new(products),
            categories: Arc::new(categories),
            users: Arc::new(users),
        }
    }

    async fn sorted(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());

        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(&id).cloned())
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let mut orders = self.orders.write().await;

        if !orders.contains_key(&order.id) {
            return Err(OrderError::NotFound(order.id));
        }

        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn list_with_details(&self, user: Option<Uuid>) -> OrderResult<Vec<OrderWithDetails>> {
        let mut result = Vec::new();

        for order in self.sorted().await {
            if user.is_some_and(|id| id != order.user) {
                continue;
            }

            let product = self.products.get_by_id(order.product).await?;
            let user_details = match user {
                Some(_) => None,
                None => self
                    .users
                    .get_by_id(order.user)
                    .await?
                    .map(UserResponse::from),
            };
            result.push(OrderWithDetails::new(order, product, user_details));
        }

        Ok(result)
    }

    async fn sales_by_category(&self) -> OrderResult<Vec<CategorySales>> {
        let mut totals: BTreeMap<String, (i64, f64)> = BTreeMap::new();

        for order in self.sorted().await {
            if order.status != OrderStatus::Completed {
                continue;
            }
            let Some(product) = self.products.get_by_id(order.product).await? else {
                continue;
            };
            let Some(category) = self.categories.get_by_id(product.category).await? else {
                continue;
            };

            let entry = totals.entry(category.name).or_default();
            entry.0 += i64::from(order.quantity);
            entry.1 += f64::from(order.quantity) * order.price;
        }

        Ok(totals
            .into_iter()
            .map(|(category, (units, revenue))| CategorySales::new(category, units, revenue))
            .collect())
    }
}
