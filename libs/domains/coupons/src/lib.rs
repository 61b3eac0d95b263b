//! Coupons Domain
//!
//! Discount codes with an expiry. Anyone may list or validate a code; only
//! admins create them.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{CouponError, CouponResult};
pub use handlers::ApiDoc;
pub use models::{Coupon, CouponDiscount, CreateCoupon};
pub use mongodb::MongoCouponRepository;
pub use repository::{CouponRepository, InMemoryCouponRepository};
pub use service::CouponService;
