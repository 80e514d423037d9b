use async_trait::async_trait;

use crate::core::Result;

/// Base repository trait for CRUD operations
/// All repositories implement this trait for consistency
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Create a new entity; the returned value carries the generated ID
    async fn create(&self, entity: T) -> Result<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>>;

    /// Replace an existing entity, returning `None` when it does not exist
    async fn update(&self, id: ID, entity: T) -> Result<Option<T>>;

    /// Delete an entity by ID, returning whether a row was removed
    async fn delete(&self, id: ID) -> Result<bool>;

    /// List all entities in the repository's natural order
    async fn list(&self) -> Result<Vec<T>>;
}
