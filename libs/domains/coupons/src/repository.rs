use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CouponError, CouponResult};
use crate::models::Coupon;

/// Repository trait for Coupon persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CouponRepository: Send + Sync {
    /// Fails with [`CouponError::DuplicateCode`] if the code is taken
    async fn create(&self, coupon: Coupon) -> CouponResult<Coupon>;

    /// Exact match on code
    async fn get_by_code(&self, code: &str) -> CouponResult<Option<Coupon>>;

    async fn list(&self) -> CouponResult<Vec<Coupon>>;
}

/// In-memory implementation of CouponRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCouponRepository {
    coupons: Arc<RwLock<HashMap<Uuid, Coupon>>>,
}

impl InMemoryCouponRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CouponRepository for InMemoryCouponRepository {
    async fn create(&self, coupon: Coupon) -> CouponResult<Coupon> {
        let mut coupons = self.coupons.write().await;

        if coupons.values().any(|c| c.code == coupon.code) {
            return Err(CouponError::DuplicateCode(coupon.code));
        }

        coupons.insert(coupon.id, coupon.clone());
        tracing::info!(coupon_id = %coupon.id, code = %coupon.code, "Created coupon");
        Ok(coupon)
    }

    async fn get_by_code(&self, code: &str) -> CouponResult<Option<Coupon>> {
        let coupons = self.coupons.read().await;
        Ok(coupons.values().find(|c| c.code == code).cloned())
    }

    async fn list(&self) -> CouponResult<Vec<Coupon>> {
        let coupons = self.coupons.read().await;
        let mut result: Vec<Coupon> = coupons.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }
}
