use async_trait::async_trait;
use chrono::Utc;
use domain_categories::CategoryRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{Product, ProductWithCategory, UpdateProduct};

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Products joined with their category; products whose category is gone are left out
    async fn list_with_category(&self) -> ProductResult<Vec<ProductWithCategory>>;

    /// Set only the fields present in `changes`; other fields, stock included,
    /// keep whatever value is stored at write time.
    ///
    /// Returns `None` when the product does not exist.
    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Atomically lower stock by `quantity` if at least that much is left.
    ///
    /// Returns the updated product, or `None` when the product is missing or
    /// its stock is insufficient.
    async fn decrement_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>>;

    /// Give back stock taken by [`ProductRepository::decrement_stock`]
    async fn increment_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Holds a category repository to perform the listing join.
#[derive(Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
    categories: Arc<dyn CategoryRepository>,
}

impl InMemoryProductRepository {
    pub fn new(categories: impl CategoryRepository + 'static) -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            categories: Arc::new(categories),
        }
    }

    async fn adjust_stock(&self, id: Uuid, delta: i32) -> Option<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id)?;

        if product.stock + delta < 0 {
            return None;
        }

        product.stock += delta;
        product.updated_at = Utc::now();
        Some(product.clone())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list_with_category(&self) -> ProductResult<Vec<ProductWithCategory>> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let mut joined = Vec::with_capacity(products.len());
        for product in products {
            if let Some(category) = self.categories.get_by_id(product.category).await? {
                joined.push(ProductWithCategory::new(product, category));
            }
        }
        Ok(joined)
    }

    async fn update(&self, id: Uuid, changes: UpdateProduct) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(&id).map(|product| {
            product.apply_update(changes);
            product.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        Ok(products.remove(&id).is_some())
    }

    async fn decrement_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        Ok(self.adjust_stock(id, -quantity).await)
    }

    async fn increment_stock(&self, id: Uuid, quantity: i32) -> ProductResult<Option<Product>> {
        Ok(self.adjust_stock(id, quantity).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;
    use domain_categories::{Category, CreateCategory, InMemoryCategoryRepository};

    async fn setup() -> (InMemoryProductRepository, InMemoryCategoryRepository, Category) {
        let categories = InMemoryCategoryRepository::new();
        let category = categories
            .create(Category::new(CreateCategory {
                name: "Electronics".to_string(),
            }))
            .await
            .unwrap();
        (
            InMemoryProductRepository::new(categories.clone()),
            categories,
            category,
        )
    }

    fn product(category: Uuid, stock: i32) -> Product {
        Product::new(CreateProduct {
            name: "Laptop".to_string(),
            price: 999.99,
            stock,
            category,
        })
    }

    #[tokio::test]
    async fn test_decrement_never_goes_negative() {
        let (repo, _, category) = setup().await;
        let created = repo.create(product(category.id, 5)).await.unwrap();

        let after = repo.decrement_stock(created.id, 3).await.unwrap().unwrap();
        assert_eq!(after.stock, 2);

        assert!(repo.decrement_stock(created.id, 3).await.unwrap().is_none());
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap().stock, 2);

        let after = repo.decrement_stock(created.id, 2).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
    }

    #[tokio::test]
    async fn test_concurrent_decrements_never_oversell() {
        let (repo, _, category) = setup().await;
        let created = repo.create(product(category.id, 10)).await.unwrap();

        let handles: Vec<_> = (0..25)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.decrement_stock(created.id, 1).await.unwrap() })
            })
            .collect();

        let mut sold = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                sold += 1;
            }
        }

        assert_eq!(sold, 10);
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap().stock, 0);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_stock_sold_after_read() {
        let (repo, _, category) = setup().await;
        let created = repo.create(product(category.id, 5)).await.unwrap();

        // Order placed after the caller loaded the product
        let loaded = repo.get_by_id(created.id).await.unwrap().unwrap();
        repo.decrement_stock(created.id, 3).await.unwrap().unwrap();

        let updated = repo
            .update(
                loaded.id,
                UpdateProduct {
                    price: Some(899.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.price, 899.0);
        assert_eq!(updated.stock, 2);
        assert_eq!(repo.get_by_id(created.id).await.unwrap().unwrap().stock, 2);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_none() {
        let (repo, _, _) = setup().await;
        let result = repo
            .update(Uuid::now_v7(), UpdateProduct::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_listing_drops_products_of_deleted_categories() {
        let (repo, categories, category) = setup().await;
        repo.create(product(category.id, 1)).await.unwrap();
        repo.create(product(Uuid::now_v7(), 1)).await.unwrap();

        let listed = repo.list_with_category().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category_details.name, "Electronics");

        categories.delete(category.id).await.unwrap();
        assert!(repo.list_with_category().await.unwrap().is_empty());
    }
}
