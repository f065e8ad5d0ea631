//! SQLite storage backend using sqlx.
//!
//! Provides `SqliteRepository<T>` backed by a `sqlx::SqlitePool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `sqlite` feature flag.
//!
//! # Schema
//!
//! All entity types share one `records` table. The full entity is stored as
//! JSON text in `data`; `entity_type` discriminates rows and the timestamps
//! are duplicated into their own columns for inspection. Insertion order is
//! the table's `rowid` order.
//!
//! Attribute lookups go through `json_extract`, so any top-level field of the
//! serialized entity can be searched. Text is matched as given or, when the
//! value parses as a UUID, in its canonical form. Floats compare numerically.

use crate::core::error::{EntityError, HbnbResult, StorageError, ValidationError};
use crate::core::{Entity, Repository};
use async_trait::async_trait;
use regex::Regex;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::LazyLock;
use uuid::Uuid;

const BACKEND: &str = "sqlite";

/// Field names allowed in JSON paths
static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+$").expect("valid field name regex"));

// ---------------------------------------------------------------------------
// Connection and schema management
// ---------------------------------------------------------------------------

/// Open a pool for `database_url`, creating the database file if needed.
///
/// `sqlite::memory:` databases live per connection, so the pool is pinned to
/// a single connection that is never recycled.
pub async fn connect(database_url: &str) -> HbnbResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(unavailable)?
        .create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    };

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(unavailable)?;

    tracing::info!(database_url, "connected to sqlite");
    Ok(pool)
}

/// Apply the required table and index (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &SqlitePool) -> HbnbResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS records (
            id TEXT NOT NULL PRIMARY KEY,
            entity_type TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(query_error)?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_records_entity_type ON records (entity_type)")
        .execute(pool)
        .await
        .map_err(query_error)?;

    Ok(())
}

fn unavailable(e: sqlx::Error) -> StorageError {
    StorageError::Unavailable {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

fn query_error(e: sqlx::Error) -> StorageError {
    StorageError::QueryError {
        backend: BACKEND.to_string(),
        message: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// SqliteRepository<T>
// ---------------------------------------------------------------------------

/// Generic repository backed by SQLite.
///
/// # Example
///
/// ```rust,ignore
/// use hbnb::storage::sqlite::{connect, ensure_schema, SqliteRepository};
///
/// let pool = connect("sqlite://hbnb.db").await?;
/// ensure_schema(&pool).await?;
/// let users = SqliteRepository::<User>::new(pool);
/// ```
#[derive(Clone, Debug)]
pub struct SqliteRepository<T> {
    pool: SqlitePool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> SqliteRepository<T> {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl<T: Entity> SqliteRepository<T> {
    fn entity_type_name() -> &'static str {
        T::resource_name_singular()
    }

    fn encode(entity: &T) -> HbnbResult<String> {
        serde_json::to_string(entity).map_err(|e| {
            StorageError::Serialization {
                entity_type: Self::entity_type_name().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn decode(data: &str) -> HbnbResult<T> {
        serde_json::from_str(data).map_err(|e| {
            StorageError::Serialization {
                entity_type: Self::entity_type_name().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn decode_rows(rows: Vec<(String,)>) -> HbnbResult<Vec<T>> {
        rows.iter().map(|(data,)| Self::decode(data)).collect()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for SqliteRepository<T> {
    async fn add(&self, entity: T) -> HbnbResult<T> {
        let data = Self::encode(&entity)?;

        sqlx::query(
            "INSERT INTO records (id, entity_type, data, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entity.id().to_string())
        .bind(Self::entity_type_name())
        .bind(&data)
        .bind(entity.created_at().to_rfc3339())
        .bind(entity.updated_at().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                StorageError::IdConflict {
                    entity_type: Self::entity_type_name().to_string(),
                    id: entity.id(),
                }
            } else {
                query_error(e)
            }
        })?;

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> HbnbResult<Option<T>> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT data FROM records WHERE id = ? AND entity_type = ?",
        )
        .bind(id.to_string())
        .bind(Self::entity_type_name())
        .fetch_optional(&self.pool)
        .await
        .map_err(query_error)?;

        row.map(|(data,)| Self::decode(&data)).transpose()
    }

    async fn get_all(&self) -> HbnbResult<Vec<T>> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT data FROM records WHERE entity_type = ? ORDER BY rowid",
        )
        .bind(Self::entity_type_name())
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Self::decode_rows(rows)
    }

    async fn update(&self, id: &Uuid, entity: T) -> HbnbResult<T> {
        let data = Self::encode(&entity)?;

        let result = sqlx::query(
            "UPDATE records SET data = ?, updated_at = ? WHERE id = ? AND entity_type = ?",
        )
        .bind(&data)
        .bind(entity.updated_at().to_rfc3339())
        .bind(id.to_string())
        .bind(Self::entity_type_name())
        .execute(&self.pool)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(EntityError::NotFound {
                entity_type: Self::entity_type_name().to_string(),
                id: *id,
            }
            .into());
        }

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> HbnbResult<bool> {
        let result = sqlx::query("DELETE FROM records WHERE id = ? AND entity_type = ?")
            .bind(id.to_string())
            .bind(Self::entity_type_name())
            .execute(&self.pool)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_attribute(&self, field: &str, value: &str) -> HbnbResult<Vec<T>> {
        if !FIELD_NAME.is_match(field) {
            return Err(ValidationError::FieldError {
                field: field.to_string(),
                message: "Invalid attribute name".to_string(),
            }
            .into());
        }
        let path = format!("$.{}", field);

        // Stored UUIDs are lowercase hyphenated; other text must match as given
        let normalized = match Uuid::parse_str(value) {
            Ok(uuid) => uuid.to_string(),
            Err(_) => value.to_string(),
        };
        let number = value.parse::<f64>().ok();

        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT data FROM records \
             WHERE entity_type = ? \
               AND (CASE json_type(data, ?) \
                      WHEN 'true' THEN ? = 'true' \
                      WHEN 'false' THEN ? = 'false' \
                      WHEN 'real' THEN json_extract(data, ?) = ? \
                      ELSE CAST(json_extract(data, ?) AS TEXT) IN (?, ?) \
                    END) \
             ORDER BY rowid",
        )
        .bind(Self::entity_type_name())
        .bind(&path)
        .bind(value)
        .bind(value)
        .bind(&path)
        .bind(number)
        .bind(&path)
        .bind(value)
        .bind(&normalized)
        .fetch_all(&self.pool)
        .await
        .map_err(query_error)?;

        Self::decode_rows(rows)
    }

    async fn count(&self) -> HbnbResult<usize> {
        let (count,) =
            sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM records WHERE entity_type = ?")
                .bind(Self::entity_type_name())
                .fetch_one(&self.pool)
                .await
                .map_err(query_error)?;

        Ok(usize::try_from(count).unwrap_or_default())
    }
}
