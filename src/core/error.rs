//! Typed error handling for the HBnB service
//!
//! Every fallible operation of the facade and the repositories returns a
//! [`HbnbResult`]. The error carries enough information to pick an HTTP status
//! code and a stable error code, so handlers can simply use `?`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing or duplicated records
//! - [`ValidationError`]: field-level and business-rule violations
//! - [`AuthError`]: authentication and authorization failures
//! - [`StorageError`]: repository backend failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! let user = facade.get_user(&id).await?;
//!
//! match facade.create_user(input).await {
//!     Ok(user) => println!("created {}", user.id),
//!     Err(HbnbError::Entity(EntityError::Duplicate { field, .. })) => {
//!         println!("{} already taken", field);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the service
#[derive(Debug, Error)]
pub enum HbnbError {
    /// Record lookup / uniqueness errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Input validation and business rules
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Authentication / authorization
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned to HTTP clients
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl HbnbError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            HbnbError::Entity(e) => e.status_code(),
            HbnbError::Validation(_) => StatusCode::BAD_REQUEST,
            HbnbError::Auth(e) => e.status_code(),
            HbnbError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HbnbError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HbnbError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            HbnbError::Entity(e) => e.error_code(),
            HbnbError::Validation(e) => e.error_code(),
            HbnbError::Auth(e) => e.error_code(),
            HbnbError::Storage(_) => "STORAGE_ERROR",
            HbnbError::Config(_) => "CONFIG_ERROR",
            HbnbError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            HbnbError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            HbnbError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }

    /// Shorthand for a single field validation failure
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        HbnbError::Validation(ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        })
    }

    /// Shorthand for a business rule violation
    pub fn rule(message: impl Into<String>) -> Self {
        HbnbError::Validation(ValidationError::Rule {
            message: message.into(),
        })
    }

    /// Shorthand for a record that does not exist
    pub fn not_found(entity_type: impl Into<String>, id: Uuid) -> Self {
        HbnbError::Entity(EntityError::NotFound {
            entity_type: entity_type.into(),
            id,
        })
    }

    /// Shorthand for an authenticated caller lacking permission
    pub fn forbidden(message: impl Into<String>) -> Self {
        HbnbError::Auth(AuthError::Forbidden {
            message: message.into(),
        })
    }
}

impl IntoResponse for HbnbError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record lookup and uniqueness
#[derive(Debug, Error)]
pub enum EntityError {
    /// Record was not found by id
    #[error("{entity_type} not found")]
    NotFound { entity_type: String, id: Uuid },

    /// Record was not found by an attribute other than its id
    #[error("{entity_type} not found")]
    NotFoundBy {
        entity_type: String,
        field: String,
        value: String,
    },

    /// A unique attribute is already used by another record
    #[error("{entity_type} {field} '{value}' already registered")]
    Duplicate {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::NotFoundBy { .. } => StatusCode::NOT_FOUND,
            EntityError::Duplicate { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::NotFoundBy { .. } => "ENTITY_NOT_FOUND",
            EntityError::Duplicate { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Business rule violation (self review, duplicate review, ...)
    #[error("{message}")]
    Rule { message: String },

    /// Invalid JSON body
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Invalid UUID format
    #[error("Invalid UUID format: {value}")]
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldError { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
            ValidationError::Rule { .. } => "BUSINESS_RULE_VIOLATION",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidUuid { .. } => "INVALID_UUID",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authentication and authorization
#[derive(Debug, Error)]
pub enum AuthError {
    /// No bearer token on a protected route
    #[error("Missing authorization token")]
    MissingToken,

    /// Token could not be decoded or has expired
    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    /// Login with an unknown email or a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Authenticated caller without the required rights
    #[error("{message}")]
    Forbidden { message: String },
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::InvalidToken { .. } => "INVALID_TOKEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Lock poisoned or connection lost
    #[error("{backend} storage unavailable: {message}")]
    Unavailable { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored data could not be (de)serialized
    #[error("Failed to serialize/deserialize {entity_type}: {message}")]
    Serialization {
        entity_type: String,
        message: String,
    },

    /// Insert of an id that is already stored
    #[error("{entity_type} with id '{id}' already stored")]
    IdConflict { entity_type: String, id: Uuid },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Missing required setting
    #[error("Missing required setting '{field}': {message}")]
    MissingField { field: String, message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for HbnbError {
    fn from(err: serde_json::Error) -> Self {
        HbnbError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for HbnbError {
    fn from(err: uuid::Error) -> Self {
        HbnbError::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for HbnbError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        HbnbError::Validation(ValidationError::FieldErrors(fields))
    }
}

/// A specialized Result type for HBnB operations
pub type HbnbResult<T> = Result<T, HbnbError>;
