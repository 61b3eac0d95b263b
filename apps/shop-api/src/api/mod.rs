//! API routes module
//!
//! Wires every domain into one router. Domain routes are nested under
//! `/api/v1` by `axum_helpers::create_router`.

pub mod health;

use axum::{Router, routing::get};
use axum_helpers::{JwtAuth, create_router};
use core_config::AppInfo;
use domain_categories::{CategoryRepository, CategoryService, InMemoryCategoryRepository, MongoCategoryRepository};
use domain_coupons::{CouponRepository, CouponService, InMemoryCouponRepository, MongoCouponRepository};
use domain_orders::{InMemoryOrderRepository, MongoOrderRepository, OrderRepository, OrderService};
use domain_products::{InMemoryProductRepository, MongoProductRepository, ProductRepository, ProductService};
use domain_users::{InMemoryUserRepository, MongoUserRepository, UserRepository, UserService};
use mongodb::Database;
use realtime::Broadcaster;
use tower_http::cors::CorsLayer;

use crate::openapi::ApiDoc;

pub const ROOT_MESSAGE: &str = "API is running...";

/// One repository per collection
#[derive(Clone)]
pub struct Repositories<C, P, O, K, U> {
    pub categories: C,
    pub products: P,
    pub orders: O,
    pub coupons: K,
    pub users: U,
}

pub type MongoRepositories = Repositories<
    MongoCategoryRepository,
    MongoProductRepository,
    MongoOrderRepository,
    MongoCouponRepository,
    MongoUserRepository,
>;

pub type InMemoryRepositories = Repositories<
    InMemoryCategoryRepository,
    InMemoryProductRepository,
    InMemoryOrderRepository,
    InMemoryCouponRepository,
    InMemoryUserRepository,
>;

impl MongoRepositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            categories: MongoCategoryRepository::new(db),
            products: MongoProductRepository::new(db),
            orders: MongoOrderRepository::new(db),
            coupons: MongoCouponRepository::new(db),
            users: MongoUserRepository::new(db),
        }
    }

    pub async fn init_indexes(&self) -> eyre::Result<()> {
        self.categories.init_indexes().await?;
        self.products.init_indexes().await?;
        self.orders.init_indexes().await?;
        self.coupons.init_indexes().await?;
        self.users.init_indexes().await?;
        Ok(())
    }
}

impl InMemoryRepositories {
    /// Fully wired in-memory stores, joins included
    pub fn in_memory() -> Self {
        let categories = InMemoryCategoryRepository::new();
        let products = InMemoryProductRepository::new(categories.clone());
        let users = InMemoryUserRepository::new();
        let orders =
            InMemoryOrderRepository::new(products.clone(), categories.clone(), users.clone());

        Self {
            categories,
            products,
            orders,
            coupons: InMemoryCouponRepository::new(),
            users,
        }
    }
}

impl<C, P, O, K, U> Repositories<C, P, O, K, U>
where
    C: CategoryRepository + Clone + 'static,
    P: ProductRepository + Clone + 'static,
    O: OrderRepository + Clone + 'static,
    K: CouponRepository + Clone + 'static,
    U: UserRepository + Clone + 'static,
{
    pub fn user_service(&self) -> UserService<U> {
        UserService::new(self.users.clone())
    }

    /// Domain routes, relative to the API prefix
    pub fn routes(&self, auth: &JwtAuth, broadcaster: &Broadcaster) -> Router {
        let categories = CategoryService::new(self.categories.clone());
        let products = ProductService::new(
            self.products.clone(),
            self.categories.clone(),
            broadcaster.clone(),
        );
        let orders = OrderService::new(
            self.orders.clone(),
            self.products.clone(),
            broadcaster.clone(),
        );
        let coupons = CouponService::new(self.coupons.clone());

        Router::new()
            .nest("/categories", domain_categories::handlers::router(categories, auth))
            .nest("/products", domain_products::handlers::router(products, auth))
            .nest("/orders", domain_orders::handlers::router(orders, auth))
            .nest("/coupons", domain_coupons::handlers::router(coupons, auth))
            .nest(
                "/auth",
                domain_users::auth_handlers::router(self.user_service(), auth),
            )
            .nest("/users", domain_users::handlers::router(self.user_service(), auth))
    }

    /// The whole HTTP surface except `/ready`, which needs a live client
    pub fn app(
        &self,
        auth: &JwtAuth,
        broadcaster: &Broadcaster,
        app_info: AppInfo,
        cors: CorsLayer,
    ) -> Router {
        create_router::<ApiDoc>(self.routes(auth, broadcaster), cors)
            .route("/", get(|| async { ROOT_MESSAGE }))
            .merge(axum_helpers::health_router(app_info))
            .merge(realtime::router(broadcaster.clone(), auth.clone()))
    }
}
