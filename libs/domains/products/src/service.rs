//! Product Service - Business logic layer

use domain_categories::CategoryRepository;
use realtime::Broadcaster;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, ProductWithCategory, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Checks that referenced categories exist and publishes `stockUpdate`
/// whenever an update sets the stock.
pub struct ProductService<R: ProductRepository, C: CategoryRepository> {
    repository: Arc<R>,
    categories: Arc<C>,
    broadcaster: Broadcaster,
}

impl<R: ProductRepository, C: CategoryRepository> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            categories: Arc::clone(&self.categories),
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl<R: ProductRepository, C: CategoryRepository> ProductService<R, C> {
    pub fn new(repository: R, categories: C, broadcaster: Broadcaster) -> Self {
        Self {
            repository: Arc::new(repository),
            categories: Arc::new(categories),
            broadcaster,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductWithCategory>> {
        self.repository.list_with_category().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.ensure_category(input.category).await?;
        self.repository.create(Product::new(input)).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        if let Some(category) = input.category {
            self.ensure_category(category).await?;
        }

        let stock_changed = input.stock.is_some();
        let product = self
            .repository
            .update(id, input)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        if stock_changed {
            self.broadcaster.publish_stock(product.id, product.stock);
        }

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn ensure_category(&self, id: Uuid) -> ProductResult<()> {
        match self.categories.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::CategoryNotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use domain_categories::{Category, CreateCategory, InMemoryCategoryRepository};

    fn input(category: Uuid) -> CreateProduct {
        CreateProduct {
            name: "Laptop".to_string(),
            price: 999.99,
            stock: 5,
            category,
        }
    }

    async fn electronics(categories: &InMemoryCategoryRepository) -> Category {
        categories
            .create(Category::new(CreateCategory {
                name: "Electronics".to_string(),
            }))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_with_unknown_category_is_rejected() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(
            repo,
            InMemoryCategoryRepository::new(),
            Broadcaster::default(),
        );
        let result = service.create_product(input(Uuid::now_v7())).await;

        assert!(matches!(result, Err(ProductError::CategoryNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_with_existing_category() {
        let categories = InMemoryCategoryRepository::new();
        let category = electronics(&categories).await;

        let mut repo = MockProductRepository::new();
        repo.expect_create().times(1).returning(Ok);

        let service = ProductService::new(repo, categories, Broadcaster::default());
        let product = service.create_product(input(category.id)).await.unwrap();

        assert_eq!(product.category, category.id);
    }

    #[tokio::test]
    async fn test_stock_patch_broadcasts_update() {
        let categories = InMemoryCategoryRepository::new();
        let category = electronics(&categories).await;
        let existing = Product::new(input(category.id));
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_update().returning(move |_, changes| {
            let mut product = existing.clone();
            product.apply_update(changes);
            Ok(Some(product))
        });

        let broadcaster = Broadcaster::default();
        let mut rx = broadcaster.subscribe();
        let service = ProductService::new(repo, categories, broadcaster);

        service
            .update_product(
                id,
                UpdateProduct {
                    stock: Some(42),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.room, format!("product_{id}"));
        assert_eq!(event.data["stock"], 42);
    }

    #[tokio::test]
    async fn test_price_patch_does_not_broadcast() {
        let categories = InMemoryCategoryRepository::new();
        let category = electronics(&categories).await;
        let existing = Product::new(input(category.id));
        let id = existing.id;

        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_update().returning(move |_, changes| {
            let mut product = existing.clone();
            product.apply_update(changes);
            Ok(Some(product))
        });

        let broadcaster = Broadcaster::default();
        let mut rx = broadcaster.subscribe();
        let service = ProductService::new(repo, categories, broadcaster);

        service
            .update_product(
                id,
                UpdateProduct {
                    price: Some(899.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(
            repo,
            InMemoryCategoryRepository::new(),
            Broadcaster::default(),
        );
        let result = service
            .update_product(Uuid::now_v7(), UpdateProduct::default())
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_price_patch_keeps_stock_sold_by_concurrent_order() {
        let categories = InMemoryCategoryRepository::new();
        let category = electronics(&categories).await;
        let products = InMemoryProductRepository::new(categories.clone());
        let product = products.create(Product::new(input(category.id))).await.unwrap();

        let service = ProductService::new(products.clone(), categories, Broadcaster::default());
        let patch = service.update_product(
            product.id,
            UpdateProduct {
                price: Some(899.0),
                ..Default::default()
            },
        );
        let order = products.decrement_stock(product.id, 3);
        let (patched, ordered) = tokio::join!(patch, order);
        patched.unwrap();
        ordered.unwrap().unwrap();

        let stored = products.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.price, 899.0);
        assert_eq!(stored.stock, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(
            repo,
            InMemoryCategoryRepository::new(),
            Broadcaster::default(),
        );

        assert!(matches!(
            service.delete_product(Uuid::now_v7()).await,
            Err(ProductError::NotFound(_))
        ));
    }
}
