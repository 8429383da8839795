use crate::models::Product;
use mongodb::{
    bson::doc, options::ClientOptions, options::IndexOptions, Client as MongoClient, Collection,
    Database, IndexModel,
};
use service_core::error::AppError;

pub const PRODUCTS_COLLECTION: &str = "products";

/// Shared handle to the MongoDB deployment. Cloning is cheap; the driver
/// pools connections behind the client.
#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let mut options = ClientOptions::parse(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        options.app_name = Some("product-service".to_string());

        let client = MongoClient::with_options(options).map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.database(database);

        let mongo = Self { client, db };
        mongo.health_check().await?;
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(mongo)
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for product-service");

        let product_id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("product_id_unique".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.products()
            .create_index(product_id_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create id index on products collection: {}", e);
                AppError::from(e)
            })?;
        tracing::info!("Created unique index on products.id");

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn products(&self) -> Collection<Product> {
        self.db.collection(PRODUCTS_COLLECTION)
    }
}
