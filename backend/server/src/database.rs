//! # Redis
//!
//! Product persistence.
//!
//! ## Layout
//!
//! - `showroom:products:{category}`: hash, product id to product JSON
//! - `showroom:product-category`: hash, product id to category, used to find a product by id
//! - `showroom:categories`: set of every category that ever held a product
//!
//! ## Batches
//!
//! Repair plans are written with one `MULTI`/`EXEC` pipeline so a batch lands
//! whole or not at all. Every target is checked against the category hash
//! first; a product that moved away fails the batch before anything is written.
//!
//! There is no locking between concurrent repairs. Callers always re-read the
//! category afterwards, so an interleaved repair shows up as leftover
//! duplicates and is fixed by running the repair again.
use std::collections::HashMap;

use async_trait::async_trait;
use ordering::{OrderAssignment, Product};
use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};
use thiserror::Error;

const CATEGORIES_KEY: &str = "showroom:categories";
const PRODUCT_CATEGORY_KEY: &str = "showroom:product-category";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Corrupt record for product {id}: {source}")]
    Corrupt {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Product JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read catalog seed: {0}")]
    Seed(#[from] std::io::Error),

    #[error("Invalid catalog seed: {0}")]
    InvalidSeed(String),

    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    #[error("Product {id} is not in category {category_id}")]
    NotInCategory { id: String, category_id: String },
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, or only those of one category.
    async fn list(&self, category_id: Option<&str>) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: &str) -> Result<Product, StoreError>;

    async fn insert(&self, product: Product) -> Result<(), StoreError>;

    async fn set_order(&self, id: &str, display_order: Option<i64>) -> Result<Product, StoreError>;

    /// Writes a repair plan for one category, all or nothing. Returns how many
    /// products changed.
    async fn apply(&self, category_id: &str, plan: &[OrderAssignment]) -> Result<usize, StoreError>;
}

fn category_key(category_id: &str) -> String {
    format!("showroom:products:{category_id}")
}

fn decode(id: &str, record: &str) -> Result<Product, StoreError> {
    serde_json::from_str(record).map_err(|source| StoreError::Corrupt {
        id: id.to_string(),
        source,
    })
}

pub async fn init_redis(redis_url: &str) -> Result<ConnectionManager, StoreError> {
    let config = ConnectionManagerConfig::new().set_number_of_retries(1);

    let client = Client::open(redis_url)?;
    let connection_manager = client.get_connection_manager_with_config(config).await?;

    Ok(connection_manager)
}

#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    async fn category_products(&self, category_id: &str) -> Result<Vec<Product>, StoreError> {
        let mut connection = self.connection.clone();
        let records: HashMap<String, String> = connection.hgetall(category_key(category_id)).await?;

        records
            .iter()
            .map(|(id, record)| decode(id, record))
            .collect()
    }
}

#[async_trait]
impl ProductStore for RedisStore {
    async fn list(&self, category_id: Option<&str>) -> Result<Vec<Product>, StoreError> {
        if let Some(category_id) = category_id {
            return self.category_products(category_id).await;
        }

        let mut connection = self.connection.clone();
        let categories: Vec<String> = connection.smembers(CATEGORIES_KEY).await?;

        let mut products = Vec::new();
        for category_id in categories {
            products.extend(self.category_products(&category_id).await?);
        }

        Ok(products)
    }

    async fn get(&self, id: &str) -> Result<Product, StoreError> {
        let mut connection = self.connection.clone();

        let category_id: Option<String> = connection.hget(PRODUCT_CATEGORY_KEY, id).await?;
        let category_id = category_id.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let record: Option<String> = connection.hget(category_key(&category_id), id).await?;
        let record = record.ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        decode(id, &record)
    }

    async fn insert(&self, product: Product) -> Result<(), StoreError> {
        let record = serde_json::to_string(&product)?;
        let mut connection = self.connection.clone();

        // HSETNX claims the id; of two concurrent creates only one gets past here
        let claimed: bool = connection
            .hset_nx(PRODUCT_CATEGORY_KEY, &product.id, &product.category_id)
            .await?;
        if !claimed {
            return Err(StoreError::AlreadyExists(product.id));
        }

        let written: redis::RedisResult<()> = redis::pipe()
            .atomic()
            .hset(category_key(&product.category_id), &product.id, record)
            .ignore()
            .sadd(CATEGORIES_KEY, &product.category_id)
            .ignore()
            .query_async(&mut connection)
            .await;

        if let Err(e) = written {
            // release the claim so the create can be retried
            let _: redis::RedisResult<()> = connection.hdel(PRODUCT_CATEGORY_KEY, &product.id).await;
            return Err(e.into());
        }

        Ok(())
    }

    async fn set_order(&self, id: &str, display_order: Option<i64>) -> Result<Product, StoreError> {
        let mut product = self.get(id).await?;
        product.display_order = display_order;

        let record = serde_json::to_string(&product)?;

        let mut connection = self.connection.clone();
        let (): () = connection
            .hset(category_key(&product.category_id), id, record)
            .await?;

        Ok(product)
    }

    async fn apply(&self, category_id: &str, plan: &[OrderAssignment]) -> Result<usize, StoreError> {
        if plan.is_empty() {
            return Ok(0);
        }

        let mut products = self.category_products(category_id).await?;

        if let Some(missing) = plan
            .iter()
            .find(|assignment| !products.iter().any(|p| p.id == assignment.item_id))
        {
            return Err(StoreError::NotInCategory {
                id: missing.item_id.clone(),
                category_id: category_id.to_string(),
            });
        }

        let changed = ordering::apply_plan(&mut products, plan);

        let key = category_key(category_id);
        let mut pipe = redis::pipe();
        pipe.atomic();

        for product in products
            .iter()
            .filter(|p| plan.iter().any(|assignment| assignment.item_id == p.id))
        {
            pipe.hset(&key, &product.id, serde_json::to_string(product)?)
                .ignore();
        }

        let mut connection = self.connection.clone();
        let (): () = pipe.query_async(&mut connection).await?;

        #[cfg(feature = "verbose")]
        tracing::debug!("Wrote {} order changes to {key}", plan.len());

        Ok(changed)
    }
}
