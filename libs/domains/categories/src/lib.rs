//! Categories Domain
//!
//! Product categories: listing is public, mutations are admin-only.
//!
//! ```text
//! handlers → CategoryService → CategoryRepository (MongoDB / in-memory)
//! ```
//!
//! ```rust,no_run
//! use domain_categories::{handlers, MongoCategoryRepository, CategoryService};
//! # use axum_helpers::{JwtAuth, JwtConfig};
//! # async fn example(db: mongodb::Database, auth: JwtAuth) {
//! let service = CategoryService::new(MongoCategoryRepository::new(&db));
//! let router = handlers::router(service, &auth);
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::ApiDoc;
pub use models::{Category, CreateCategory, UpdateCategory};
pub use mongodb::MongoCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
