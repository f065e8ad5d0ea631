//! User endpoints

use super::views::UserView;
use crate::core::extractors::{ApiJson, CurrentUser, EntityId, OptionalUser};
use crate::core::{AuthPolicy, HbnbError, HbnbResult};
use crate::entities::{NewUser, UserUpdate};
use crate::services::HbnbFacade;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

/// POST /users/first-admin-user
///
/// Bootstraps an empty deployment. Refused once any user exists.
pub async fn create_first_admin(
    State(facade): State<HbnbFacade>,
    ApiJson(mut input): ApiJson<NewUser>,
) -> HbnbResult<(StatusCode, Json<Value>)> {
    if facade.has_users().await? {
        return Err(HbnbError::forbidden("Already initialized"));
    }

    input.is_admin = true;
    let user = facade.create_user(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Admin user created", "user_id": user.id })),
    ))
}

/// POST /users
pub async fn create_user(
    State(facade): State<HbnbFacade>,
    OptionalUser(caller): OptionalUser,
    ApiJson(input): ApiJson<NewUser>,
) -> HbnbResult<(StatusCode, Json<UserView>)> {
    AuthPolicy::AdminOnly.enforce(&caller)?;

    let user = facade.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users
pub async fn list_users(State(facade): State<HbnbFacade>) -> HbnbResult<Json<Vec<UserView>>> {
    let users = facade.get_all_users().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// GET /users/{id}
pub async fn get_user(
    State(facade): State<HbnbFacade>,
    EntityId(user_id): EntityId,
) -> HbnbResult<Json<UserView>> {
    Ok(Json(facade.get_user(&user_id).await?.into()))
}

/// PUT /users/{id}
///
/// Users may edit their own profile; only admins may change credentials or
/// admin status.
pub async fn update_user(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(user_id): EntityId,
    ApiJson(update): ApiJson<UserUpdate>,
) -> HbnbResult<Json<UserView>> {
    AuthPolicy::OwnerOrAdmin(user_id).enforce(&caller.context())?;

    if !caller.is_admin {
        if update.changes_credentials() {
            return Err(HbnbError::rule("You cannot modify email or password"));
        }
        if update.is_admin.is_some() {
            return Err(HbnbError::forbidden("Admin privileges required"));
        }
    }

    Ok(Json(facade.update_user(&user_id, update).await?.into()))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(facade): State<HbnbFacade>,
    caller: CurrentUser,
    EntityId(user_id): EntityId,
) -> HbnbResult<Json<Value>> {
    AuthPolicy::AdminOnly.enforce(&caller.context())?;

    facade.delete_user(&user_id).await?;
    Ok(Json(json!({ "message": "User deleted successfully" })))
}
