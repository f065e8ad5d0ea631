//! Entity trait shared by every stored record

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all records handled by the repositories.
///
/// All entities have:
/// - id: Unique identifier (UUID v4)
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// `Serialize + DeserializeOwned` is required so that document-style
/// backends (the SQLite repository) can persist the full record.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name used in URLs (e.g., "users", "places")
    fn resource_name() -> &'static str;

    /// The display name of the entity type (e.g., "User", "Place")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a specific field by name
    ///
    /// Used by `Repository::get_by_attribute`. Unknown fields return `None`.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}
