//! Role gate middleware for protected route groups.
//!
//! Each protected group is wrapped with
//! `from_fn_with_state(RouteGuard::new(..), require_roles)`. On success the
//! admitted [`Principal`] is stored in the request extensions where the
//! [`AuthUser`](crate::extractors::AuthUser) extractor picks it up.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use quizhub_auth::{AllowedRoles, Authorizer, Principal};

use crate::error::ApiResult;

/// Middleware state: the shared authorizer plus one group's role set.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    authorizer: Arc<Authorizer>,
    allowed: Arc<AllowedRoles>,
}

impl RouteGuard {
    /// Creates a guard admitting `allowed` (and always `admin`).
    pub fn new(authorizer: Arc<Authorizer>, allowed: AllowedRoles) -> Self {
        Self {
            authorizer,
            allowed: Arc::new(allowed),
        }
    }
}

/// Rejects the request unless the bearer token verifies, the account still
/// exists, and its stored role is admitted.
pub async fn require_roles(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let principal: Principal = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        guard.authorizer.authorize(header, &guard.allowed).await?
    };

    tracing::debug!(
        user_id = %principal.user_id,
        role = %principal.role_name,
        admin = principal.is_admin(),
        "Request admitted"
    );
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
