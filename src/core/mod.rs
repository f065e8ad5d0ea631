//! Core module containing fundamental traits and types of the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod field;
pub mod password;
pub mod service;

pub use auth::{AuthContext, AuthPolicy, Claims, JwtKeys};
pub use entity::Entity;
pub use error::{HbnbError, HbnbResult};
pub use field::FieldValue;
pub use service::Repository;
