//! Domain entities: users, places, amenities and reviews
//!
//! Each entity owns its validation rules (through `validator` derives on the
//! `New*` and `*Update` inputs) and implements [`Entity`](crate::core::Entity)
//! so any [`Repository`](crate::core::Repository) backend can store it.

pub mod amenity;
pub mod place;
pub mod review;
pub mod user;

pub use amenity::{Amenity, AmenityUpdate, NewAmenity};
pub use place::{NewPlace, Place, PlaceUpdate};
pub use review::{NewReview, Review, ReviewUpdate};
pub use user::{NewUser, User, UserUpdate};
