//! Axum extractors for authentication, JSON bodies and path identifiers
//!
//! Every rejection is an [`HbnbError`], so malformed requests render the same
//! `{"error", "code", "details"}` body as failures raised by the facade.

use crate::core::auth::{AuthContext, JwtKeys};
use crate::core::error::{AuthError, HbnbError, ValidationError};
use axum::Json;
use axum::extract::{FromRef, FromRequest, FromRequestParts, Path, Request};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// Pull the token out of `Authorization: Bearer <token>`
///
/// Returns `Ok(None)` when the header is absent.
fn bearer_token(headers: &HeaderMap) -> Result<Option<&str>, HbnbError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| AuthError::InvalidToken {
        message: "Authorization header is not valid UTF-8".to_string(),
    })?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => Err(AuthError::InvalidToken {
            message: "Expected a Bearer token".to_string(),
        }
        .into()),
    }
}

/// An authenticated caller
///
/// Rejects with 401 when the token is missing, malformed or expired.
///
/// ```rust,ignore
/// async fn whoami(user: CurrentUser) -> String {
///     user.user_id.to_string()
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn context(&self) -> AuthContext {
        AuthContext::User {
            user_id: self.user_id,
            is_admin: self.is_admin,
        }
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    Arc<JwtKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = HbnbError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?.ok_or(AuthError::MissingToken)?;
        let keys = Arc::<JwtKeys>::from_ref(state);
        let claims = keys.verify(token)?;

        Ok(Self {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        })
    }
}

/// Caller identity when a token is supplied, anonymous otherwise
///
/// A token that is present but invalid is still rejected with 401.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub AuthContext);

impl<S> FromRequestParts<S> for OptionalUser
where
    Arc<JwtKeys>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = HbnbError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match bearer_token(&parts.headers)? {
            Some(token) => {
                let keys = Arc::<JwtKeys>::from_ref(state);
                Ok(Self(keys.verify(token)?.into()))
            }
            None => Ok(Self(AuthContext::Anonymous)),
        }
    }
}

/// JSON body extractor that rejects malformed payloads with 400
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HbnbError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(Self(payload)),
            Err(rejection) => Err(ValidationError::InvalidJson {
                message: rejection.body_text(),
            }
            .into()),
        }
    }
}

/// The `{id}` path segment parsed as a UUID
///
/// Anything that is not a UUID is a 400, never a 404.
#[derive(Debug, Clone, Copy)]
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = HbnbError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::InvalidUuid {
                value: rejection.body_text(),
            })?;

        Uuid::parse_str(&raw)
            .map(Self)
            .map_err(|_| ValidationError::InvalidUuid { value: raw }.into())
    }
}
