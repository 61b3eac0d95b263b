//! Shop API - e-commerce REST backend over MongoDB
//!
//! Categories, products, orders, coupons and accounts under `/api/v1`,
//! with stock and sales events pushed over `/ws`.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;
