//! Database connectivity for the shop services.
//!
//! MongoDB is the only backend. The crate owns connection configuration,
//! startup retry with backoff, and liveness probes; collections and queries
//! live in the domain crates.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and health checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
