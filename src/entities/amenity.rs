//! Amenity entity

use crate::core::error::HbnbResult;
use crate::core::{Entity, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAmenity {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters."))]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AmenityUpdate {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters."))]
    pub name: Option<String>,
}

impl Amenity {
    pub fn new(input: NewAmenity) -> HbnbResult<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name: input.name,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: AmenityUpdate) -> HbnbResult<()> {
        update.validate()?;
        if let Some(name) = update.name {
            self.name = name;
        }
        self.touch();
        Ok(())
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Amenity {
    fn resource_name() -> &'static str {
        "amenities"
    }

    fn resource_name_singular() -> &'static str {
        "Amenity"
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
            "name" => Some(FieldValue::String(self.name.clone())),
            _ => None,
        }
    }
}
