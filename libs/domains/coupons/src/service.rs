//! Coupon Service - Business logic layer

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CouponError, CouponResult};
use crate::models::{Coupon, CouponDiscount, CreateCoupon};
use crate::repository::CouponRepository;

pub struct CouponService<R: CouponRepository> {
    repository: Arc<R>,
}

impl<R: CouponRepository> Clone for CouponService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CouponRepository> CouponService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> CouponResult<Vec<Coupon>> {
        self.repository.list().await
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create_coupon(&self, input: CreateCoupon) -> CouponResult<Coupon> {
        input
            .validate()
            .map_err(|e| CouponError::Validation(e.to_string()))?;

        self.repository.create(Coupon::new(input)).await
    }

    pub async fn validate_coupon(&self, code: &str) -> CouponResult<CouponDiscount> {
        self.validate_coupon_at(code, Utc::now()).await
    }

    /// Validate against an explicit clock
    #[instrument(skip(self))]
    pub async fn validate_coupon_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> CouponResult<CouponDiscount> {
        let coupon = self
            .repository
            .get_by_code(code)
            .await?
            .ok_or_else(|| CouponError::NotFound(code.to_string()))?;

        if coupon.is_expired_at(now) {
            return Err(CouponError::Expired(coupon.code));
        }

        Ok(CouponDiscount {
            discount: coupon.discount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCouponRepository;
    use chrono::Duration;
    use mockall::predicate::eq;

    fn stored(expires_at: DateTime<Utc>) -> Coupon {
        Coupon::new(CreateCoupon {
            code: "SAVE10".to_string(),
            discount: 10.0,
            expires_at,
        })
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let mut repo = MockCouponRepository::new();
        repo.expect_get_by_code()
            .with(eq("NOPE"))
            .returning(|_| Ok(None));

        let service = CouponService::new(repo);
        assert!(matches!(
            service.validate_coupon("NOPE").await,
            Err(CouponError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let now = Utc::now();
        let coupon = stored(now - Duration::seconds(1));
        let mut repo = MockCouponRepository::new();
        repo.expect_get_by_code()
            .returning(move |_| Ok(Some(coupon.clone())));

        let service = CouponService::new(repo);
        assert!(matches!(
            service.validate_coupon_at("SAVE10", now).await,
            Err(CouponError::Expired(_))
        ));
    }

    #[tokio::test]
    async fn test_code_expiring_exactly_now_is_valid() {
        let now = Utc::now();
        let coupon = stored(now);
        let mut repo = MockCouponRepository::new();
        repo.expect_get_by_code()
            .returning(move |_| Ok(Some(coupon.clone())));

        let service = CouponService::new(repo);
        let discount = service.validate_coupon_at("SAVE10", now).await.unwrap();
        assert_eq!(discount, CouponDiscount { discount: 10.0 });
    }

    #[tokio::test]
    async fn test_negative_discount_never_reaches_storage() {
        let mut repo = MockCouponRepository::new();
        repo.expect_create().never();

        let service = CouponService::new(repo);
        let result = service
            .create_coupon(CreateCoupon {
                code: "BAD".to_string(),
                discount: -5.0,
                expires_at: Utc::now(),
            })
            .await;

        assert!(matches!(result, Err(CouponError::Validation(_))));
    }
}
