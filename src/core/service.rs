//! Repository trait: the storage abstraction underneath the facade

use crate::core::entity::Entity;
use crate::core::error::HbnbResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage-access abstraction for one entity type
///
/// Implementations provide get/add/update/delete by identifier or attribute.
/// The facade is agnostic to the underlying storage mechanism; backends are
/// swapped by handing a different `Arc<dyn Repository<T>>` to it.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new entity. Fails if its id is already stored.
    async fn add(&self, entity: T) -> HbnbResult<T>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> HbnbResult<Option<T>>;

    /// List all entities in insertion order
    async fn get_all(&self) -> HbnbResult<Vec<T>>;

    /// Replace an existing entity. Fails with NotFound if absent.
    async fn update(&self, id: &Uuid, entity: T) -> HbnbResult<T>;

    /// Delete an entity, returning whether it existed
    async fn delete(&self, id: &Uuid) -> HbnbResult<bool>;

    /// All entities whose `field` matches `value`
    async fn find_by_attribute(&self, field: &str, value: &str) -> HbnbResult<Vec<T>>;

    /// First entity whose `field` matches `value`
    async fn get_by_attribute(&self, field: &str, value: &str) -> HbnbResult<Option<T>> {
        Ok(self.find_by_attribute(field, value).await?.into_iter().next())
    }

    /// Number of stored entities
    async fn count(&self) -> HbnbResult<usize> {
        Ok(self.get_all().await?.len())
    }
}
