use crate::models::Design;
use crate::services::store::DesignStore;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::{
    bson::doc, options::FindOptions, options::IndexOptions, Client as MongoClient, Collection,
    Database, IndexModel,
};
use service_core::error::AppError;

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for design-service");

        let designs = self.designs();

        // Compound index on (user_id, updated_at) backs the owner-scoped
        // list sorted by most recent update.
        let owner_recency_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "updated_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("owner_recency_lookup".to_string())
                    .build(),
            )
            .build();

        designs
            .create_index(owner_recency_index, None)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to create owner_recency index on designs collection: {}",
                    e
                );
                AppError::from(e)
            })?;
        tracing::info!("Created index on designs.(user_id, updated_at)");

        Ok(())
    }

    pub fn designs(&self) -> Collection<Design> {
        self.db.collection("designs")
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DesignStore for MongoDb {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Design>, AppError> {
        let find_options = FindOptions::builder()
            .sort(doc! { "updated_at": -1 })
            .build();

        let mut cursor = self
            .designs()
            .find(doc! { "user_id": user_id }, find_options)
            .await
            .map_err(AppError::from)?;

        let mut designs = Vec::new();
        while let Some(design) = cursor.try_next().await.map_err(AppError::from)? {
            designs.push(design);
        }

        Ok(designs)
    }

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Design>, AppError> {
        self.designs()
            .find_one(doc! { "_id": id, "user_id": user_id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Design>, AppError> {
        self.designs()
            .find_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)
    }

    async fn insert(&self, design: &Design) -> Result<(), AppError> {
        self.designs()
            .insert_one(design, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn save(&self, design: &Design) -> Result<(), AppError> {
        self.designs()
            .replace_one(doc! { "_id": &design.id }, design, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        self.designs()
            .delete_one(doc! { "_id": id }, None)
            .await
            .map_err(AppError::from)?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
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
}
