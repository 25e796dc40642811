//! Per-request authorization: verify the bearer token, re-read the caller,
//! and apply the route's role set.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::UserId;
use quizhub_database::store::UserStore;

use super::enforcer::AllowedRoles;
use crate::jwt::JwtDecoder;

/// The authenticated caller admitted for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Caller's user ID.
    pub user_id: UserId,
    /// Caller's role as currently stored.
    pub role_name: String,
}

impl Principal {
    /// Whether the caller holds the superuser role.
    pub fn is_admin(&self) -> bool {
        self.role_name == quizhub_entity::role::ADMIN_ROLE
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Decides whether a request may reach a protected handler.
///
/// The role is always re-read from storage; the token's role claim is never
/// used for the decision, so downgrades and deletions take effect on the
/// next request.
#[derive(Clone)]
pub struct Authorizer {
    decoder: JwtDecoder,
    users: Arc<dyn UserStore>,
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("decoder", &self.decoder)
            .finish_non_exhaustive()
    }
}

impl Authorizer {
    /// Creates an authorizer over the given decoder and user store.
    pub fn new(decoder: JwtDecoder, users: Arc<dyn UserStore>) -> Self {
        Self { decoder, users }
    }

    /// Authorize a request given its raw `Authorization` header value.
    ///
    /// `Unauthorized` when the header is missing or malformed, the token
    /// does not verify, or the account is gone. `Forbidden` when the
    /// stored role is not admitted.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        allowed: &AllowedRoles,
    ) -> AppResult<Principal> {
        let token = authorization
            .and_then(extract_bearer)
            .ok_or_else(|| AppError::unauthorized("Missing or malformed bearer token"))?;

        let claims = self.decoder.verify(token)?;

        let user = self.users.find_by_id(claims.sub).await?.ok_or_else(|| {
            debug!(user_id = %claims.sub, "Token subject no longer exists");
            AppError::unauthorized("Account not found")
        })?;

        if !allowed.admits(&user.role_name) {
            warn!(
                user_id = %user.id,
                role = %user.role_name,
                "Role not permitted for route"
            );
            return Err(AppError::forbidden(format!(
                "Role '{}' is not permitted to access this resource",
                user.role_name
            )));
        }

        Ok(Principal {
            user_id: user.id,
            role_name: user.role_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quizhub_core::ErrorKind;
    use quizhub_core::config::AuthConfig;
    use quizhub_core::types::RoleId;
    use quizhub_database::MemoryStore;
    use quizhub_entity::user::{CreateUser, UpdateUser};

    use crate::jwt::JwtEncoder;

    struct Fixture {
        store: MemoryStore,
        encoder: JwtEncoder,
        authorizer: Authorizer,
    }

    fn fixture() -> Fixture {
        let cfg = AuthConfig::with_secret("guard-secret");
        let store = MemoryStore::new();
        Fixture {
            authorizer: Authorizer::new(JwtDecoder::new(&cfg), Arc::new(store.clone())),
            encoder: JwtEncoder::new(&cfg),
            store,
        }
    }

    async fn user_with_role(store: &MemoryStore, name: &str, role_id: RoleId) -> UserId {
        UserStore::create(
            store,
            &CreateUser {
                username: name.into(),
                email: format!("{name}@example.com"),
                password_hash: "hash".into(),
                role_id,
            },
        )
        .await
        .expect("create user")
        .id
    }

    fn bearer(encoder: &JwtEncoder, id: UserId, role: &str) -> String {
        let issued = encoder.issue(id, role, Duration::minutes(5)).expect("issue");
        format!("Bearer {}", issued.token)
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer("bearer abc"), Some("abc"));
        assert_eq!(extract_bearer("BEARER  abc "), Some("abc"));
        assert_eq!(extract_bearer("Bearer "), None);
        assert_eq!(extract_bearer("Bearer"), None);
        assert_eq!(extract_bearer("Basic abc"), None);
        assert_eq!(extract_bearer(""), None);
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let f = fixture();
        let err = f.authorizer.authorize(None, &AllowedRoles::Any).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = f
            .authorizer
            .authorize(Some("Bearer garbage"), &AllowedRoles::Any)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_student_forbidden_on_admin_route() {
        let f = fixture();
        let id = user_with_role(&f.store, "stu", RoleId::STUDENT).await;
        let header = bearer(&f.encoder, id, "student");

        let err = f
            .authorizer
            .authorize(Some(&header), &AllowedRoles::only(["admin"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let principal = f
            .authorizer
            .authorize(Some(&header), &AllowedRoles::Any)
            .await
            .unwrap();
        assert_eq!(principal.user_id, id);
        assert_eq!(principal.role_name, "student");
    }

    #[tokio::test]
    async fn test_admin_passes_any_route() {
        let f = fixture();
        let id = user_with_role(&f.store, "root", RoleId::ADMIN).await;
        let header = bearer(&f.encoder, id, "admin");

        let principal = f
            .authorizer
            .authorize(Some(&header), &AllowedRoles::only(["teacher"]))
            .await
            .unwrap();
        assert!(principal.is_admin());
    }

    #[tokio::test]
    async fn test_role_claim_is_not_trusted() {
        let f = fixture();
        let id = user_with_role(&f.store, "sneaky", RoleId::STUDENT).await;
        // Token claims admin, storage says student.
        let header = bearer(&f.encoder, id, "admin");

        let err = f
            .authorizer
            .authorize(Some(&header), &AllowedRoles::only(["admin"]))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_downgrade_applies_immediately() {
        let f = fixture();
        let id = user_with_role(&f.store, "demoted", RoleId::ADMIN).await;
        let header = bearer(&f.encoder, id, "admin");
        let admin_only = AllowedRoles::only(["admin"]);

        assert!(f.authorizer.authorize(Some(&header), &admin_only).await.is_ok());

        UserStore::update(
            &f.store,
            id,
            &UpdateUser {
                role_id: Some(RoleId::STUDENT),
                ..UpdateUser::default()
            },
        )
        .await
        .unwrap();

        let err = f
            .authorizer
            .authorize(Some(&header), &admin_only)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_deleted_account_is_unauthorized() {
        let f = fixture();
        let id = user_with_role(&f.store, "gone", RoleId::TEACHER).await;
        let header = bearer(&f.encoder, id, "teacher");
        UserStore::delete(&f.store, id).await.unwrap();

        let err = f
            .authorizer
            .authorize(Some(&header), &AllowedRoles::Any)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
