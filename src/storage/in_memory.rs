//! In-memory implementation of Repository for testing and development

use crate::core::error::{EntityError, HbnbResult, StorageError};
use crate::core::{Entity, Repository};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory repository
///
/// Keeps entities in insertion order. Uses RwLock for thread-safe access;
/// cloning the repository shares the underlying map.
#[derive(Clone)]
pub struct InMemoryRepository<T> {
    storage: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable {
        backend: "memory".to_string(),
        message: format!("lock poisoned: {}", e),
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn add(&self, entity: T) -> HbnbResult<T> {
        let mut storage = self.storage.write().map_err(poisoned)?;

        let id = entity.id();
        if storage.contains_key(&id) {
            return Err(StorageError::IdConflict {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into());
        }
        storage.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> HbnbResult<Option<T>> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.get(id).cloned())
    }

    async fn get_all(&self) -> HbnbResult<Vec<T>> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.values().cloned().collect())
    }

    async fn update(&self, id: &Uuid, entity: T) -> HbnbResult<T> {
        let mut storage = self.storage.write().map_err(poisoned)?;

        match storage.get_mut(id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            }
            .into()),
        }
    }

    async fn delete(&self, id: &Uuid) -> HbnbResult<bool> {
        let mut storage = self.storage.write().map_err(poisoned)?;
        // shift_remove keeps the remaining entries in insertion order
        Ok(storage.shift_remove(id).is_some())
    }

    async fn find_by_attribute(&self, field: &str, value: &str) -> HbnbResult<Vec<T>> {
        let storage = self.storage.read().map_err(poisoned)?;

        Ok(storage
            .values()
            .filter(|entity| {
                entity
                    .field_value(field)
                    .is_some_and(|candidate| candidate.matches_str(value))
            })
            .cloned()
            .collect())
    }

    async fn count(&self) -> HbnbResult<usize> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.len())
    }
}
