//! Order Service - Business logic layer

use axum_helpers::AuthUser;
use domain_products::ProductRepository;
use realtime::Broadcaster;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderStatus, OrderWithDetails, UpdateOrderStatus};
use crate::repository::OrderRepository;

pub struct OrderService<O: OrderRepository, P: ProductRepository> {
    orders: Arc<O>,
    products: Arc<P>,
    broadcaster: Broadcaster,
}

impl<O: OrderRepository, P: ProductRepository> Clone for OrderService<O, P> {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            products: Arc::clone(&self.products),
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl<O: OrderRepository, P: ProductRepository> OrderService<O, P> {
    pub fn new(orders: O, products: P, broadcaster: Broadcaster) -> Self {
        Self {
            orders: Arc::new(orders),
            products: Arc::new(products),
            broadcaster,
        }
    }

    /// Reserve stock, then persist the order.
    ///
    /// The stock check is repeated atomically by the decrement, so of two
    /// concurrent orders for the last units only one succeeds.
    #[instrument(skip(self, input), fields(product_id = %input.product_id, quantity = input.quantity))]
    pub async fn create_order(&self, input: CreateOrder, user_id: Uuid) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let product_id = input.product_id;
        let quantity = input.quantity;
        let insufficient = OrderError::InsufficientStock {
            product_id,
            requested: quantity,
        };

        let product = self
            .products
            .get_by_id(product_id)
            .await?
            .ok_or(OrderError::ProductNotFound(product_id))?;

        if product.stock < quantity {
            tracing::info!(stock = product.stock, "Order rejected, insufficient stock");
            return Err(insufficient);
        }

        let Some(reserved) = self.products.decrement_stock(product_id, quantity).await? else {
            tracing::info!("Order rejected, stock taken concurrently");
            return Err(insufficient);
        };

        let order = match self.orders.create(Order::new(&product, quantity, user_id)).await {
            Ok(order) => order,
            Err(e) => {
                tracing::error!(error = %e, "Order insert failed, restoring stock");
                if let Err(restore) = self.products.increment_stock(product_id, quantity).await {
                    tracing::error!(error = %restore, "Failed to restore reserved stock");
                }
                return Err(e);
            }
        };

        self.broadcaster.publish_stock(product_id, reserved.stock);
        tracing::info!(order_id = %order.id, stock = reserved.stock, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: Uuid) -> OrderResult<Order> {
        self.orders
            .get_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// Admins see every order with its user; everyone else only their own
    #[instrument(skip(self), fields(user_id = %user.id))]
    pub async fn list_orders(&self, user: AuthUser) -> OrderResult<Vec<OrderWithDetails>> {
        let scope = if user.is_admin() { None } else { Some(user.id) };
        self.orders.list_with_details(scope).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_status(
        &self,
        id: Uuid,
        input: UpdateOrderStatus,
    ) -> OrderResult<OrderWithDetails> {
        let mut order = self.get_order(id).await?;

        if let Some(status) = input.status {
            order.status = status;
            order.updated_at = chrono::Utc::now();
        }

        let order = self.orders.update(order).await?;
        tracing::info!(order_id = %id, status = %order.status, "Order status updated");

        if order.status == OrderStatus::Completed {
            self.publish_sales().await;
        }

        let product = self.products.get_by_id(order.product).await?;
        Ok(OrderWithDetails::new(order, product, None))
    }

    /// The status change is already persisted, so a failure here is logged only
    async fn publish_sales(&self) {
        match self.orders.sales_by_category().await {
            Ok(sales) => self.broadcaster.publish_admin_analytics(&sales),
            Err(e) => tracing::error!(error = %e, "Failed to compute sales analytics"),
        }
    }
}
