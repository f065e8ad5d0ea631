//! Version 1 of the API

pub mod amenities;
pub mod auth;
pub mod places;
pub mod reviews;
pub mod users;
pub mod views;

use crate::server::ServerHost;
use axum::Router;
use axum::routing::{get, post};

pub fn routes() -> Router<ServerHost> {
    Router::new()
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/protected", get(auth::protected))
        // Users
        .route("/users/first-admin-user", post(users::create_first_admin))
        .route("/users", post(users::create_user).get(users::list_users))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Amenities
        .route(
            "/amenities",
            post(amenities::create_amenity).get(amenities::list_amenities),
        )
        .route(
            "/amenities/{id}",
            get(amenities::get_amenity)
                .put(amenities::update_amenity)
                .delete(amenities::delete_amenity),
        )
        // Places
        .route("/places", post(places::create_place).get(places::list_places))
        .route(
            "/places/{id}",
            get(places::get_place)
                .put(places::update_place)
                .delete(places::delete_place),
        )
        .route("/places/{id}/amenities", post(places::add_amenity))
        .route("/places/{id}/reviews", get(places::list_place_reviews))
        // Reviews
        .route(
            "/reviews",
            post(reviews::create_review).get(reviews::list_reviews),
        )
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        )
}
