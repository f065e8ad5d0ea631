//! Response shapes
//!
//! Users are never serialized directly so the password hash cannot leak.

use crate::entities::{Amenity, Place, User};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Place owner as embedded in a place detail
#[derive(Debug, Serialize)]
pub struct OwnerView {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for OwnerView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AmenityRef {
    pub id: Uuid,
    pub name: String,
}

impl From<Amenity> for AmenityRef {
    fn from(amenity: Amenity) -> Self {
        Self {
            id: amenity.id,
            name: amenity.name,
        }
    }
}

/// Entry of the place listing
#[derive(Debug, Serialize)]
pub struct PlaceSummary {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Place> for PlaceSummary {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            title: place.title,
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
        }
    }
}

/// A place with its owner and amenities resolved
#[derive(Debug, Serialize)]
pub struct PlaceDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: OwnerView,
    pub amenities: Vec<AmenityRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PlaceDetail {
    pub fn new(place: Place, owner: User, amenities: Vec<Amenity>) -> Self {
        Self {
            id: place.id,
            title: place.title,
            description: place.description,
            price: place.price,
            latitude: place.latitude,
            longitude: place.longitude,
            owner: owner.into(),
            amenities: amenities.into_iter().map(AmenityRef::from).collect(),
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}
