use crate::models::Design;
use async_trait::async_trait;
use service_core::error::AppError;

/// Persistence seam for design records.
///
/// Every handler goes through this trait, so the HTTP surface can be
/// exercised against `MemoryStore` in tests while production runs on
/// `MongoDb`.
#[async_trait]
pub trait DesignStore: Send + Sync {
    /// All designs owned by `user_id`, most recently updated first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Design>, AppError>;

    /// Lookup scoped to the owner; `None` covers both "no such id" and
    /// "someone else's design".
    async fn find_for_user(&self, id: &str, user_id: &str) -> Result<Option<Design>, AppError>;

    /// Lookup by id alone. Used by the AI regeneration path, which applies
    /// no owner filter.
    async fn find_by_id(&self, id: &str) -> Result<Option<Design>, AppError>;

    async fn insert(&self, design: &Design) -> Result<(), AppError>;

    /// Persist the full record under its id, replacing the stored version.
    async fn save(&self, design: &Design) -> Result<(), AppError>;

    /// Delete by id alone; the owner check happens in the preceding lookup.
    async fn delete_by_id(&self, id: &str) -> Result<(), AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
