//! MongoDB implementation of CategoryRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::Category;
use crate::repository::CategoryRepository;

pub const COLLECTION: &str = "categories";

#[derive(Clone)]
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Category>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> CategoryResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "createdAt": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Category indexes created successfully");
        Ok(())
    }
}

fn id_filter(id: Uuid) -> mongodb::bson::Document {
    doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        self.collection.insert_one(&category).await?;
        tracing::info!("Category created");
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    #[instrument(skip(self, category), fields(category_id = %category.id))]
    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let result = self
            .collection
            .replace_one(id_filter(category.id), &category)
            .await?;

        if result.matched_count == 0 {
            return Err(CategoryError::NotFound(category.id));
        }
        Ok(category)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let result = self.collection.delete_one(id_filter(id)).await?;
        Ok(result.deleted_count > 0)
    }
}
