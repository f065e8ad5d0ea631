//! Review endpoints

use crate::core::extractors::{ApiJson, CurrentUser, EntityId};
use crate::core::{AuthPolicy, HbnbResult};
use crate::entities::{NewReview, Review, ReviewUpdate};
use crate::services::HbnbFacade;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

async fn authored_review(
    facade: &HbnbFacade,
    caller: &CurrentUser,
    review_id: &Uuid,
) -> HbnbResult<Review> {
    let review = facade.get_review(review_id).await?;
    AuthPolicy::OwnerOrAdmin(review.user_id).enforce(&caller.context())?;
    Ok(review)
}

/// POST /reviews
///
/// The author is always the caller, whatever the body says.
pub async fn create_review(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    ApiJson(mut input): ApiJson<NewReview>,
) -> HbnbResult<(StatusCode, Json<Review>)> {
    input.user_id = Some(caller.user_id);
    Ok((StatusCode::CREATED, Json(facade.create_review(input).await?)))
}

pub async fn list_reviews(State(facade): State<HbnbFacade>) -> HbnbResult<Json<Vec<Review>>> {
    Ok(Json(facade.get_all_reviews().await?))
}

pub async fn get_review(
    State(facade): State<HbnbFacade>,
    EntityId(review_id): EntityId,
) -> HbnbResult<Json<Review>> {
    Ok(Json(facade.get_review(&review_id).await?))
}

pub async fn update_review(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(review_id): EntityId,
    ApiJson(update): ApiJson<ReviewUpdate>,
) -> HbnbResult<Json<Review>> {
    authored_review(&facade, &caller, &review_id).await?;
    Ok(Json(facade.update_review(&review_id, update).await?))
}

pub async fn delete_review(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(review_id): EntityId,
) -> HbnbResult<Json<Value>> {
    authored_review(&facade, &caller, &review_id).await?;
    facade.delete_review(&review_id).await?;
    Ok(Json(json!({ "message": "Review deleted successfully" })))
}
