//! In-memory store used by the integration tests.

use crate::models::Design;
use crate::services::store::DesignStore;
use async_trait::async_trait;
use service_core::error::AppError;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// `DesignStore` backed by a HashMap. Mirrors the Mongo implementation's
/// semantics, including sort order and delete-by-id-alone.
#[derive(Default)]
pub struct MemoryStore {
    designs: RwLock<HashMap<String, Design>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record directly, bypassing the handlers.
    pub async fn put(&self, design: Design) {
        self.designs.write().await.insert(design.id.clone(), design);
    }

    pub async fn get(&self, id: &str) -> Option<Design> {
        self.designs.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.designs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.designs.read().await.is_empty()
    }
}

#[async_trait]
impl DesignStore for MemoryStore {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Design>, AppError> {
        let mut designs: Vec<Design> = self
            .designs
            .read()
            .await
            .values()
            .filter(|d| d.user_id == user_id)
            .cloned()
            .collect();
        designs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(designs)
    }

    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Design>, AppError> {
        Ok(self
            .designs
            .read()
            .await
            .get(id)
            .filter(|d| d.user_id == user_id)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Design>, AppError> {
        Ok(self.designs.read().await.get(id).cloned())
    }

    async fn insert(&self, design: &Design) -> Result<(), AppError> {
        self.put(design.clone()).await;
        Ok(())
    }

    async fn save(&self, design: &Design) -> Result<(), AppError> {
        self.put(design.clone()).await;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), AppError> {
        self.designs.write().await.remove(id);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
