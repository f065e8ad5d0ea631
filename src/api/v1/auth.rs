//! Login and token check

use crate::core::extractors::{ApiJson, CurrentUser};
use crate::core::{HbnbResult, JwtKeys};
use crate::services::HbnbFacade;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// POST /auth/login
pub async fn login(
    State(facade): State<HbnbFacade>,
    State(keys): State<Arc<JwtKeys>>,
    ApiJson(credentials): ApiJson<LoginRequest>,
) -> HbnbResult<Json<TokenResponse>> {
    let user = facade
        .authenticate(&credentials.email, &credentials.password)
        .await?;
    let access_token = keys.issue(user.id, user.is_admin)?;

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { access_token }))
}

/// GET /auth/protected
pub async fn protected(user: CurrentUser) -> Json<Value> {
    Json(json!({ "message": format!("Hello, user {}", user.user_id) }))
}
