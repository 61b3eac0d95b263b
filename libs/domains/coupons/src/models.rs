use axum_helpers::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Coupon entity, stored in the `coupons` collection (unique `code`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub code: String,
    pub discount: f64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCoupon {
    #[validate(custom(function = "not_blank"), length(max = 64))]
    pub code: String,
    #[validate(range(min = 0.0))]
    pub discount: f64,
    pub expires_at: DateTime<Utc>,
}

/// Body of a successful validation: only the discount is disclosed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CouponDiscount {
    pub discount: f64,
}

impl Coupon {
    pub fn new(input: CreateCoupon) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            code: input.code.trim().to_string(),
            discount: input.discount,
            expires_at: input.expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Valid up to and including `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn coupon(expires_at: DateTime<Utc>) -> Coupon {
        Coupon::new(CreateCoupon {
            code: " SAVE10 ".to_string(),
            discount: 10.0,
            expires_at,
        })
    }

    #[test]
    fn test_code_is_trimmed() {
        assert_eq!(coupon(Utc::now()).code, "SAVE10");
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = Utc::now();
        let coupon = coupon(now);

        assert!(!coupon.is_expired_at(now));
        assert!(coupon.is_expired_at(now + Duration::milliseconds(1)));
        assert!(!coupon.is_expired_at(now - Duration::days(1)));
    }

    #[test]
    fn test_create_accepts_camel_case_expiry() {
        let input: CreateCoupon = serde_json::from_value(serde_json::json!({
            "code": "SAVE10",
            "discount": 10,
            "expiresAt": "2030-01-01T00:00:00Z",
        }))
        .unwrap();
        assert_eq!(input.expires_at.to_rfc3339(), "2030-01-01T00:00:00+00:00");
    }
}
