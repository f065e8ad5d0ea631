//! Authentication and authorization
//!
//! Provides JWT issuance/verification and context-based authorization:
//! - Bearer tokens carry the user id (`sub`) and the admin flag
//! - `AuthContext` is what a handler knows about the caller
//! - `AuthPolicy` expresses the handful of checks the API performs

use crate::core::error::{AuthError, HbnbError, HbnbResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in every access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    /// Admin flag at issuance time
    pub is_admin: bool,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

/// HS256 signing and verification keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    /// Build keys from a shared secret and a token lifetime
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue an access token for a user
    pub fn issue(&self, user_id: Uuid, is_admin: bool) -> HbnbResult<String> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| HbnbError::Internal("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: user_id,
            is_admin,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| HbnbError::Internal(format!("token encoding failed: {}", e)))
    }

    /// Decode and validate a token (signature and expiry)
    pub fn verify(&self, token: &str) -> HbnbResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                AuthError::InvalidToken {
                    message: e.to_string(),
                }
                .into()
            })
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys").field("ttl", &self.ttl).finish()
    }
}

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Authenticated user
    User { user_id: Uuid, is_admin: bool },

    /// No authentication (public access)
    Anonymous,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        AuthContext::User {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        }
    }
}

impl AuthContext {
    /// Check if context represents an admin
    pub fn is_admin(&self) -> bool {
        matches!(self, AuthContext::User { is_admin: true, .. })
    }

    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Owner of the resource, or an admin
    pub fn can_act_on(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.user_id() == Some(owner_id)
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// Admin only
    AdminOnly,

    /// The given owner, or an admin
    OwnerOrAdmin(Uuid),
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),
            AuthPolicy::AdminOnly => context.is_admin(),
            AuthPolicy::OwnerOrAdmin(owner_id) => context.can_act_on(*owner_id),
        }
    }

    /// Like [`check`](Self::check) but produces the matching error:
    /// 401 for anonymous callers, 403 for authenticated ones.
    pub fn enforce(&self, context: &AuthContext) -> HbnbResult<()> {
        if self.check(context) {
            return Ok(());
        }
        if matches!(context, AuthContext::Anonymous) {
            return Err(AuthError::MissingToken.into());
        }
        let message = match self {
            AuthPolicy::AdminOnly => "Admin privileges required",
            _ => "Unauthorized action",
        };
        Err(HbnbError::forbidden(message))
    }
}
