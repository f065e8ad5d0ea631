//! Place entity

use crate::core::error::HbnbResult;
use crate::core::{Entity, FieldValue, HbnbError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A rental listing owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner_id: Uuid,
    /// Attached amenities, in attachment order
    #[serde(default)]
    pub amenity_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a place
///
/// `owner_id` may be omitted by API callers; it then defaults to the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPlace {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 1000, message = "Description must be 1000 characters maximum."))]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative."))]
    pub price: f64,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90."))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180."))]
    pub longitude: f64,

    #[serde(default)]
    pub owner_id: Option<Uuid>,
}

/// Partial update of a place; ownership cannot be transferred
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlaceUpdate {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters."))]
    pub title: Option<String>,

    #[validate(length(max = 1000, message = "Description must be 1000 characters maximum."))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative."))]
    pub price: Option<f64>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90."))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180."))]
    pub longitude: Option<f64>,
}

impl Place {
    /// Validate the input and build a place owned by `owner_id`
    pub fn new(input: NewPlace, owner_id: Uuid) -> HbnbResult<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            price: input.price,
            latitude: input.latitude,
            longitude: input.longitude,
            owner_id,
            amenity_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate and apply a partial update
    pub fn apply(&mut self, update: PlaceUpdate) -> HbnbResult<()> {
        update.validate()?;
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(latitude) = update.latitude {
            self.latitude = latitude;
        }
        if let Some(longitude) = update.longitude {
            self.longitude = longitude;
        }
        self.touch();
        Ok(())
    }

    /// Attach an amenity; attaching the same one twice is an error
    pub fn add_amenity(&mut self, amenity_id: Uuid) -> HbnbResult<()> {
        if self.amenity_ids.contains(&amenity_id) {
            return Err(HbnbError::rule("Amenity already registered for that place"));
        }
        self.amenity_ids.push(amenity_id);
        self.touch();
        Ok(())
    }

    /// Detach an amenity, returning whether it was attached
    pub fn remove_amenity(&mut self, amenity_id: &Uuid) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        let removed = self.amenity_ids.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Place {
    fn resource_name() -> &'static str {
        "places"
    }

    fn resource_name_singular() -> &'static str {
        "Place"
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
            "title" => Some(FieldValue::String(self.title.clone())),
            "price" => Some(FieldValue::Float(self.price)),
            "owner_id" => Some(FieldValue::Uuid(self.owner_id)),
            _ => None,
        }
    }
}
