use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::Category;

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: Category) -> CategoryResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// All categories, oldest first
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Replace an existing category
    async fn update(&self, category: Category) -> CategoryResult<Category>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut result: Vec<Category> = categories.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn update(&self, category: Category) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if !categories.contains_key(&category.id) {
            return Err(CategoryError::NotFound(category.id));
        }

        categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> CategoryResult<bool> {
        let mut categories = self.categories.write().await;
        Ok(categories.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCategory;

    fn category(name: &str) -> Category {
        Category::new(CreateCategory {
            name: name.to_string(),
        })
    }

    #[tokio::test]
    async fn test_list_is_oldest_first() {
        let repo = InMemoryCategoryRepository::new();
        let first = repo.create(category("Electronics")).await.unwrap();
        let second = repo.create(category("Books")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryCategoryRepository::new();
        let result = repo.update(category("Ghost")).await;
        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = InMemoryCategoryRepository::new();
        let created = repo.create(category("Toys")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
