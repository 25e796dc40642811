//! `AuthUser` extractor: the caller admitted by the role gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use quizhub_auth::Principal;
use quizhub_core::error::AppError;

use crate::error::ApiError;

/// Authenticated caller available in handlers behind
/// [`require_roles`](crate::middleware::auth::require_roles).
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Present only when the route group ran the role gate.
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("Authentication required").into())
    }
}
