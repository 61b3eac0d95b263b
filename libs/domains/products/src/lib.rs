//! Products Domain
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, category checks, stock broadcasts
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! Stock is only ever lowered through [`ProductRepository::decrement_stock`],
//! a conditional update that refuses to go below zero.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_categories::MongoCategoryRepository;
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use realtime::Broadcaster;
//! # use axum_helpers::JwtAuth;
//! # async fn example(db: mongodb::Database, auth: JwtAuth) {
//! let service = ProductService::new(
//!     MongoProductRepository::new(&db),
//!     MongoCategoryRepository::new(&db),
//!     Broadcaster::default(),
//! );
//! let router = handlers::router(service, &auth);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, Product, ProductWithCategory, UpdateProduct};
pub use mongodb::MongoProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
