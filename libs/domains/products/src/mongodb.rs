//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductWithCategory, UpdateProduct};
use crate::repository::ProductRepository;

pub const COLLECTION: &str = "products";
const CATEGORIES_COLLECTION: &str = "categories";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>(COLLECTION),
        }
    }

    /// Create a new MongoProductRepository with a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        Self {
            collection: db.collection::<Product>(collection_name),
        }
    }

    /// Initialize indexes for optimal query performance
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            // $lookup joins and per-category queries
            IndexModel::builder()
                .keys(doc! { "category": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    async fn inc_stock(&self, filter: Document, delta: i32) -> ProductResult<Option<Product>> {
        let update = doc! {
            "$inc": { "stock": delta },
            "$set": { "updatedAt": to_bson(&Utc::now()).unwrap_or(Bson::Null) },
        };

        let product = self
            .collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(product)
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
}

/// `$set` body holding only the fields present in the patch, plus `updatedAt`
fn set_document(changes: &UpdateProduct) -> Document {
    let mut set = doc! { "updatedAt": to_bson(&Utc::now()).unwrap_or(Bson::Null) };
    if let Some(name) = &changes.name {
        set.insert("name", name.trim());
    }
    if let Some(price) = changes.price {
        set.insert("price", price);
    }
    if let Some(stock) = changes.stock {
        set.insert("stock", stock);
    }
    if let Some(category) = changes.category {
        set.insert("category", to_bson(&category).unwrap_or(Bson::Null));
    }
    set
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn create(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;
        tracing::info!("Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list_with_category(&self) -> ProductResult<Vec<ProductWithCategory>> {
        let pipeline = vec![
            doc! { "$sort": { "createdAt": 1 } },
            doc! {
                "$lookup": {
                    "from": CATEGORIES_COLLECTION,
                    "localField": "category",
                    "foreignField": "_id",
                    "as": "categoryDetails",
                }
            },
            // Inner join: products without a category are dropped
            doc! { "$unwind": "$categoryDetails" },
        ];

        let products = self
            .collection
            .aggregate(pipeline)
            .with_type::<ProductWithCategory>()
            .await?
            .try_collect()
            .await?;
        Ok(products)
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>> {
        let product = self
            .collection
            .find_one_and_update(id_filter(id), doc! { "$set": set_document(&changes) })
            .return_document(ReturnDocument::After)
            .await?;

        if product.is_some() {
            tracing::info!("Product updated successfully");
        }
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn decrement_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        let mut filter = id_filter(id);
        filter.insert("stock", doc! { "$gte": quantity });
        self.inc_stock(filter, -quantity).await
    }

    #[instrument(skip(self))]
    async fn increment_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        self.inc_stock(id_filter(id), quantity).await
    }
}
