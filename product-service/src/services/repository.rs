//! Product persistence.
//!
//! Handlers only see [`ProductRepository`]; startup picks the MongoDB-backed
//! implementation or the in-memory one used by tests and local runs.

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};
use service_core::error::AppError;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::Product;
use crate::services::MongoDb;

/// A window over the product listing, ordered by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: u64,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), AppError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError>;

    async fn list(&self, page: Pagination) -> Result<Vec<Product>, AppError>;

    /// Sets `prodprice` on the matching product and returns it as stored
    /// afterwards, or `None` when nothing matched.
    async fn update_price(&self, id: &str, unit_price: &str)
        -> Result<Option<Product>, AppError>;

    /// Removes at most one product, returning how many were removed.
    async fn delete(&self, id: &str) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct MongoProductRepository {
    db: MongoDb,
}

impl MongoProductRepository {
    pub fn new(db: MongoDb) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), AppError> {
        let result = self.db.products().insert_one(product, None).await?;
        tracing::debug!(product_id = %product.id, inserted_id = %result.inserted_id, "Inserted product document");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        let product = self.db.products().find_one(doc! { "id": id }, None).await?;
        Ok(product)
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Product>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "id": 1 })
            .skip(page.skip)
            .limit(i64::try_from(page.limit).unwrap_or(i64::MAX))
            .build();

        let mut cursor = self.db.products().find(doc! {}, find_options).await?;

        let mut products = Vec::new();
        while let Some(product) = cursor.try_next().await? {
            products.push(product);
        }
        Ok(products)
    }

    async fn update_price(
        &self,
        id: &str,
        unit_price: &str,
    ) -> Result<Option<Product>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let product = self
            .db
            .products()
            .find_one_and_update(
                doc! { "id": id },
                doc! { "$set": { "prodprice": unit_price } },
                options,
            )
            .await?;
        Ok(product)
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        let result = self.db.products().delete_one(doc! { "id": id }, None).await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.db.health_check().await
    }
}

/// Map-backed store keyed by product id, so iteration order matches the
/// MongoDB listing sort.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<String, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), AppError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Duplicate product id {}",
                product.id
            )));
        }
        products.insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, AppError> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<Product>, AppError> {
        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);

        Ok(self
            .products
            .read()
            .await
            .values()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_price(
        &self,
        id: &str,
        unit_price: &str,
    ) -> Result<Option<Product>, AppError> {
        let mut products = self.products.write().await;
        Ok(products.get_mut(id).map(|product| {
            product.unit_price = unit_price.to_string();
            product.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<u64, AppError> {
        Ok(u64::from(self.products.write().await.remove(id).is_some()))
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
