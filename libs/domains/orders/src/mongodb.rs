//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
    options::IndexOptions,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CategorySales, Order, OrderStatus, OrderWithDetails};
use crate::repository::OrderRepository;

pub const COLLECTION: &str = "orders";

#[derive(Clone)]
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Order>(COLLECTION),
        }
    }

    pub async fn init_indexes(&self) -> OrderResult<()> {
        let indexes = vec![
            // Customer order listing
            IndexModel::builder()
                .keys(doc! { "user": 1, "createdAt": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_user_created_at".to_string())
                        .build(),
                )
                .build(),
            // Sales analytics
            IndexModel::builder()
                .keys(doc! { "status": 1 })
                .options(IndexOptions::builder().name("idx_status".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Order indexes created successfully");
        Ok(())
    }
}

fn uuid_bson(id: Uuid) -> Bson {
    to_bson(&id).unwrap_or(Bson::Null)
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": uuid_bson(id) }
}

fn lookup_one(from: &str, local: &str, as_field: &str) -> [Document; 2] {
    [
        doc! {
            "$lookup": {
                "from": from,
                "localField": local,
                "foreignField": "_id",
                "as": as_field,
            }
        },
        // Left join: a deleted product or user leaves the field unset
        doc! {
            "$unwind": {
                "path": format!("${as_field}"),
                "preserveNullAndEmptyArrays": true,
            }
        },
    ]
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn create(&self, order: Order) -> OrderResult<Order> {
        self.collection.insert_one(&order).await?;
        tracing::info!("Order created");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        Ok(self.collection.find_one(id_filter(id)).await?)
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn update(&self, order: Order) -> OrderResult<Order> {
        let result = self
            .collection
            .replace_one(id_filter(order.id), &order)
            .await?;

        if result.matched_count == 0 {
            return Err(OrderError::NotFound(order.id));
        }
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list_with_details(&self, user: Option<Uuid>) -> OrderResult<Vec<OrderWithDetails>> {
        let mut pipeline = Vec::new();
        if let Some(user) = user {
            pipeline.push(doc! { "$match": { "user": uuid_bson(user) } });
        }
        pipeline.push(doc! { "$sort": { "createdAt": 1 } });
        pipeline.extend(lookup_one(
            domain_products::mongodb::COLLECTION,
            "product",
            "productDetails",
        ));
        if user.is_none() {
            pipeline.extend(lookup_one(
                domain_users::mongodb::COLLECTION,
                "user",
                "userDetails",
            ));
            pipeline.push(doc! { "$project": { "userDetails.passwordHash": 0 } });
        }

        let orders = self
            .collection
            .aggregate(pipeline)
            .with_type::<OrderWithDetails>()
            .await?
            .try_collect()
            .await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn sales_by_category(&self) -> OrderResult<Vec<CategorySales>> {
        let completed = to_bson(&OrderStatus::Completed).unwrap_or(Bson::Null);
        let pipeline = vec![
            doc! { "$match": { "status": completed } },
            doc! {
                "$lookup": {
                    "from": domain_products::mongodb::COLLECTION,
                    "localField": "product",
                    "foreignField": "_id",
                    "as": "productDoc",
                }
            },
            doc! { "$unwind": "$productDoc" },
            doc! {
                "$lookup": {
                    "from": domain_categories::mongodb::COLLECTION,
                    "localField": "productDoc.category",
                    "foreignField": "_id",
                    "as": "categoryDoc",
                }
            },
            doc! { "$unwind": "$categoryDoc" },
            doc! {
                "$group": {
                    "_id": "$categoryDoc.name",
                    "totalSales": { "$sum": { "$toLong": "$quantity" } },
                    "revenue": { "$sum": { "$multiply": ["$quantity", "$price"] } },
                }
            },
            doc! {
                "$project": {
                    "_id": 0,
                    "category": "$_id",
                    "totalSales": 1,
                    "revenue": 1,
                }
            },
            doc! { "$sort": { "category": 1 } },
        ];

        let sales: Vec<CategorySales> = self
            .collection
            .aggregate(pipeline)
            .with_type::<CategorySales>()
            .await?
            .try_collect()
            .await?;

        Ok(sales
            .into_iter()
            .map(|s| CategorySales::new(s.category, s.total_sales, s.revenue))
            .collect())
    }
}
