//! MongoDB implementation of CouponRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key;
use futures_util::TryStreamExt;
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::instrument;

use crate::error::{CouponError, CouponResult};
use crate::models::Coupon;
use crate::repository::CouponRepository;

pub const COLLECTION: &str = "coupons";

#[derive(Clone)]
pub struct MongoCouponRepository {
    collection: Collection<Coupon>,
}

impl MongoCouponRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Coupon>(COLLECTION),
        }
    }

    /// The unique index on `code` is what rejects concurrent duplicates
    pub async fn init_indexes(&self) -> CouponResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("idx_code_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Coupon indexes created successfully");
        Ok(())
    }
}

#[async_trait]
impl CouponRepository for MongoCouponRepository {
    #[instrument(skip(self, coupon), fields(code = %coupon.code))]
    async fn create(&self, coupon: Coupon) -> CouponResult<Coupon> {
        match self.collection.insert_one(&coupon).await {
            Ok(_) => {
                tracing::info!(coupon_id = %coupon.id, "Coupon created");
                Ok(coupon)
            }
            Err(e) if is_duplicate_key(&e) => Err(CouponError::DuplicateCode(coupon.code)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn get_by_code(&self, code: &str) -> CouponResult<Option<Coupon>> {
        Ok(self.collection.find_one(doc! { "code": code }).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CouponResult<Vec<Coupon>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }
}
