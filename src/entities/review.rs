//! Review entity

use crate::core::error::HbnbResult;
use crate::core::{Entity, FieldValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A user's review of a place. One per (user, place).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub text: String,
    pub rating: i32,
    pub place_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a review; `user_id` defaults to the caller
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewReview {
    #[validate(length(min = 1, max = 150, message = "Text must be between 1 and 150 characters."))]
    pub text: String,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: i32,

    pub place_id: Uuid,

    #[serde(default)]
    pub user_id: Option<Uuid>,
}

/// Partial update of a review; the place and author are fixed
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewUpdate {
    #[validate(length(min = 1, max = 150, message = "Text must be between 1 and 150 characters."))]
    pub text: Option<String>,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    pub rating: Option<i32>,
}

impl Review {
    pub fn new(input: NewReview, user_id: Uuid) -> HbnbResult<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            text: input.text,
            rating: input.rating,
            place_id: input.place_id,
            user_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: ReviewUpdate) -> HbnbResult<()> {
        update.validate()?;
        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        self.touch();
        Ok(())
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Review {
    fn resource_name() -> &'static str {
        "reviews"
    }

    fn resource_name_singular() -> &'static str {
        "Review"
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
            "place_id" => Some(FieldValue::Uuid(self.place_id)),
            "user_id" => Some(FieldValue::Uuid(self.user_id)),
            "rating" => Some(FieldValue::Integer(i64::from(self.rating))),
            _ => None,
        }
    }
}
