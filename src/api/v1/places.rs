//! Place endpoints

use super::views::{PlaceDetail, PlaceSummary};
use crate::core::extractors::{ApiJson, CurrentUser, EntityId};
use crate::core::{AuthPolicy, HbnbError, HbnbResult};
use crate::entities::{NewPlace, Place, PlaceUpdate, Review};
use crate::services::HbnbFacade;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AmenityName {
    pub name: String,
}

async fn detail(facade: &HbnbFacade, place: Place) -> HbnbResult<PlaceDetail> {
    let owner = facade.get_place_owner(&place).await?;
    let amenities = facade.get_place_amenities(&place.id).await?;
    Ok(PlaceDetail::new(place, owner, amenities))
}

/// Load a place and check the caller may modify it
async fn owned_place(
    facade: &HbnbFacade,
    caller: &CurrentUser,
    place_id: &Uuid,
) -> HbnbResult<Place> {
    let place = facade.get_place(place_id).await?;
    AuthPolicy::OwnerOrAdmin(place.owner_id).enforce(&caller.context())?;
    Ok(place)
}

/// POST /places
///
/// The owner defaults to the caller; naming somebody else is reserved to
/// admins.
pub async fn create_place(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    ApiJson(mut input): ApiJson<NewPlace>,
) -> HbnbResult<(StatusCode, Json<Place>)> {
    match input.owner_id {
        Some(owner_id) if owner_id != caller.user_id && !caller.is_admin => {
            return Err(HbnbError::forbidden("You can only create a place for yourself"));
        }
        Some(_) => {}
        None => input.owner_id = Some(caller.user_id),
    }

    Ok((StatusCode::CREATED, Json(facade.create_place(input).await?)))
}

/// GET /places
pub async fn list_places(State(facade): State<HbnbFacade>) -> HbnbResult<Json<Vec<PlaceSummary>>> {
    let places = facade.get_all_places().await?;
    Ok(Json(places.into_iter().map(PlaceSummary::from).collect()))
}

/// GET /places/{id}
pub async fn get_place(
    State(facade): State<HbnbFacade>,
    EntityId(place_id): EntityId,
) -> HbnbResult<Json<PlaceDetail>> {
    let place = facade.get_place(&place_id).await?;
    Ok(Json(detail(&facade, place).await?))
}

/// PUT /places/{id}
pub async fn update_place(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(place_id): EntityId,
    ApiJson(update): ApiJson<PlaceUpdate>,
) -> HbnbResult<Json<Place>> {
    owned_place(&facade, &caller, &place_id).await?;
    Ok(Json(facade.update_place(&place_id, update).await?))
}

/// DELETE /places/{id}
pub async fn delete_place(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(place_id): EntityId,
) -> HbnbResult<Json<Value>> {
    owned_place(&facade, &caller, &place_id).await?;
    facade.delete_place(&place_id).await?;
    Ok(Json(json!({ "message": "Place deleted successfully" })))
}

/// POST /places/{id}/amenities
pub async fn add_amenity(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(place_id): EntityId,
    ApiJson(body): ApiJson<AmenityName>,
) -> HbnbResult<Json<PlaceDetail>> {
    owned_place(&facade, &caller, &place_id).await?;
    let place = facade.add_amenity_to_place(&place_id, &body.name).await?;
    Ok(Json(detail(&facade, place).await?))
}

/// GET /places/{id}/reviews
pub async fn list_place_reviews(
    State(facade): State<HbnbFacade>,
    EntityId(place_id): EntityId,
) -> HbnbResult<Json<Vec<Review>>> {
    Ok(Json(facade.get_reviews_by_place(&place_id).await?))
}
