//! Orders Domain
//!
//! Placing an order reserves stock with
//! [`ProductRepository::decrement_stock`](domain_products::ProductRepository::decrement_stock),
//! a conditional update, before the order is written. If the write fails the
//! reserved quantity is given back. Every successful order publishes a
//! `stockUpdate` event for its product room.
//!
//! Marking an order `completed` recomputes per-category sales over all
//! completed orders and publishes it to the `admin_dashboard` room.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CategorySales, CreateOrder, Order, OrderStatus, OrderWithDetails, UpdateOrderStatus};
pub use mongodb::MongoOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
