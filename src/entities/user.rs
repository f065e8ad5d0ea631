//! User entity

use crate::core::error::HbnbResult;
use crate::core::password::{hash_password, verify_password};
use crate::core::{Entity, FieldValue};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

/// Accepted email shape
pub static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,6}$").expect("valid email regex")
});

/// Letters only (any script)
pub static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{L}+$").expect("valid name regex"));

/// A registered user. `password_hash` is an Argon2 PHC string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 1, max = 50, message = "First name must be between 1 and 50 characters."),
        regex(path = *NAME_REGEX, message = "First name must be a string of letters.")
    )]
    pub first_name: String,

    #[validate(
        length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters."),
        regex(path = *NAME_REGEX, message = "Last name must be a string of letters.")
    )]
    pub last_name: String,

    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email format."))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty."))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update of a user; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(
        length(min = 1, max = 50, message = "First name must be between 1 and 50 characters."),
        regex(path = *NAME_REGEX, message = "First name must be a string of letters.")
    )]
    pub first_name: Option<String>,

    #[validate(
        length(min = 1, max = 50, message = "Last name must be between 1 and 50 characters."),
        regex(path = *NAME_REGEX, message = "Last name must be a string of letters.")
    )]
    pub last_name: Option<String>,

    #[validate(regex(path = *EMAIL_REGEX, message = "Invalid email format."))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Password cannot be empty."))]
    pub password: Option<String>,

    pub is_admin: Option<bool>,
}

impl UserUpdate {
    /// Whether the update touches login credentials
    pub fn changes_credentials(&self) -> bool {
        self.email.is_some() || self.password.is_some()
    }
}

impl User {
    /// Validate the input and hash the password
    pub fn new(input: NewUser) -> HbnbResult<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            is_admin: input.is_admin,
            created_at: now,
            updated_at: now,
        })
    }

    /// Check a plaintext password against the stored hash
    pub fn verify_password(&self, plain: &str) -> bool {
        verify_password(plain, &self.password_hash)
    }

    /// Validate and apply a partial update
    pub fn apply(&mut self, update: UserUpdate) -> HbnbResult<()> {
        update.validate()?;
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(password) = update.password {
            self.password_hash = hash_password(&password)?;
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        self.touch();
        Ok(())
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "User"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id)),
            "first_name" => Some(FieldValue::String(self.first_name.clone())),
            "last_name" => Some(FieldValue::String(self.last_name.clone())),
            "email" => Some(FieldValue::String(self.email.clone())),
            "is_admin" => Some(FieldValue::Boolean(self.is_admin)),
            _ => None,
        }
    }
}
