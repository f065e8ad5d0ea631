//! Amenity endpoints; writes are admin-only

use crate::core::extractors::{ApiJson, EntityId, OptionalUser};
use crate::core::{AuthPolicy, HbnbResult};
use crate::entities::{Amenity, AmenityUpdate, NewAmenity};
use crate::services::HbnbFacade;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub async fn create_amenity(
    State(facade): State<HbnbFacade>,
    OptionalUser(caller): OptionalUser,
    ApiJson(input): ApiJson<NewAmenity>,
) -> HbnbResult<(StatusCode, Json<Amenity>)> {
    AuthPolicy::AdminOnly.enforce(&caller)?;
    Ok((StatusCode::CREATED, Json(facade.create_amenity(input).await?)))
}

pub async fn list_amenities(State(facade): State<HbnbFacade>) -> HbnbResult<Json<Vec<Amenity>>> {
    Ok(Json(facade.get_all_amenities().await?))
}

pub async fn get_amenity(
    State(facade): State<HbnbFacade>,
    EntityId(amenity_id): EntityId,
) -> HbnbResult<Json<Amenity>> {
    Ok(Json(facade.get_amenity(&amenity_id).await?))
}

pub async fn update_amenity(
    State(facade): State<HbnbFacade>,
    OptionalUser(caller): OptionalUser,
    EntityId(amenity_id): EntityId,
    ApiJson(update): ApiJson<AmenityUpdate>,
) -> HbnbResult<Json<Amenity>> {
    AuthPolicy::AdminOnly.enforce(&caller)?;
    Ok(Json(facade.update_amenity(&amenity_id, update).await?))
}

pub async fn delete_amenity(
    State(facade): State<HbnbFacade>,
    OptionalUser(caller): OptionalUser,
    EntityId(amenity_id): EntityId,
) -> HbnbResult<Json<Value>> {
    AuthPolicy::AdminOnly.enforce(&caller)?;
    facade.delete_amenity(&amenity_id).await?;
    Ok(Json(json!({ "message": "Amenity deleted successfully" })))
}
