//! # HBnB
//!
//! A vacation-rental listing REST API: users, places, amenities and reviews,
//! with JWT authentication and pluggable storage.
//!
//! ## Layers
//!
//! - **Entities** validate their own fields (`validator` derives)
//! - **Repositories** store entities (`InMemoryRepository`, or
//!   `SqliteRepository` behind the `sqlite` feature)
//! - **HbnbFacade** enforces cross-entity rules: unique emails and amenity
//!   names, owner existence, one review per user and place, cascades
//! - **REST handlers** under `/api/v1` authenticate callers with bearer
//!   tokens and map every failure to a JSON error body
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hbnb::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load(None)?;
//!
//!     ServerBuilder::new()
//!         .with_facade(HbnbFacade::in_memory())
//!         .with_jwt_keys(config.jwt_keys()?)
//!         .serve(&config.bind_address())
//!         .await
//! }
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, Claims, JwtKeys},
        entity::Entity,
        error::{
            AuthError, ConfigError, EntityError, HbnbError, HbnbResult, StorageError,
            ValidationError,
        },
        extractors::{ApiJson, CurrentUser, EntityId, OptionalUser},
        field::FieldValue,
        service::Repository,
    };

    // === Entities ===
    pub use crate::entities::{
        Amenity, AmenityUpdate, NewAmenity, NewPlace, NewReview, NewUser, Place, PlaceUpdate,
        Review, ReviewUpdate, User, UserUpdate,
    };

    // === Services & Storage ===
    pub use crate::services::HbnbFacade;
    pub use crate::storage::InMemoryRepository;
    #[cfg(feature = "sqlite")]
    pub use crate::storage::SqliteRepository;

    // === Server ===
    pub use crate::config::{AppConfig, Environment, StorageBackend};
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === Re-exports from dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
