//! Server host: the application state shared by every handler
//!
//! The host is transport-agnostic. It bundles the facade and the token keys;
//! the REST exposure turns it into an axum `Router` state, and handlers pull
//! the parts they need through `FromRef`.

use crate::core::JwtKeys;
use crate::services::HbnbFacade;
use axum::extract::FromRef;
use std::sync::Arc;

/// Host context containing all application state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(HbnbFacade::in_memory(), Arc::new(keys));
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
#[derive(Clone, FromRef)]
pub struct ServerHost {
    /// Service layer over the configured repositories
    pub facade: HbnbFacade,

    /// Signing and verification keys for access tokens
    pub keys: Arc<JwtKeys>,
}

impl ServerHost {
    pub fn new(facade: HbnbFacade, keys: Arc<JwtKeys>) -> Self {
        Self { facade, keys }
    }
}
