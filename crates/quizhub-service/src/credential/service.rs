//! Credential use cases.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use quizhub_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::UserId;
use quizhub_database::store::UserStore;
use quizhub_entity::role::BuiltinRole;
use quizhub_entity::user::{CreateUser, UpdateUser, User};

/// The only message login failures carry, whatever the cause.
const INVALID_LOGIN: &str = "Invalid username or password";

/// A successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The account that logged in.
    pub user: User,
}

/// Self-registration input.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role (`student`, `user`, `teacher`, or `moderator`).
    pub role_name: String,
}

/// Authenticates accounts and manages their passwords.
#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
}

impl std::fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialService").finish_non_exhaustive()
    }
}

impl CredentialService {
    /// Creates a new credential service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
        }
    }

    /// Verify a username/password pair and issue a session token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResult> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.hasher.verify_dummy(password);
            warn!(username = %username, "Login failed: unknown user");
            return Err(AppError::invalid_credentials(INVALID_LOGIN));
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_LOGIN));
        }

        let issued = self
            .encoder
            .issue_default(user.id, &user.role_name)
            .map_err(|e| {
                error!(user_id = %user.id, error = %e, "Token issuance failed");
                AppError::internal("Failed to issue token")
            })?;

        info!(user_id = %user.id, role = %user.role_name, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            user,
        })
    }

    /// Create a self-registered account.
    ///
    /// Duplicate usernames or emails surface as `Conflict` from the store.
    pub async fn register(&self, input: RegisterUser) -> AppResult<User> {
        let username = input.username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        let email = input.email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        self.validator.validate(&input.password)?;

        let role = BuiltinRole::for_registration(&input.role_name)
            .ok_or_else(|| AppError::validation("Invalid role name"))?;

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role_id: role.id(),
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, role = %role, "User registered");
        Ok(user)
    }

    /// Replace the caller's password after checking the current one.
    pub async fn change_password(
        &self,
        user_id: UserId,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.current_user(user_id).await?;

        if !self.hasher.verify_password(old_password, &user.password_hash)? {
            warn!(user_id = %user_id, "Password change rejected: wrong current password");
            return Err(AppError::invalid_credentials("Current password is incorrect"));
        }
        self.validator.validate(new_password)?;

        let password_hash = self.hasher.hash_password(new_password)?;
        self.users
            .update(
                user_id,
                &UpdateUser {
                    password_hash: Some(password_hash),
                    ..UpdateUser::default()
                },
            )
            .await?;

        info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Load the caller's account.
    pub async fn current_user(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizhub_auth::JwtDecoder;
    use quizhub_core::ErrorKind;
    use quizhub_database::MemoryStore;

    use crate::testing;

    fn service() -> CredentialService {
        CredentialService::new(
            Arc::new(MemoryStore::new()),
            testing::hasher(),
            testing::validator(),
            testing::encoder(),
        )
    }

    fn registration(username: &str, password: &str, role: &str) -> RegisterUser {
        RegisterUser {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: password.into(),
            role_name: role.into(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let svc = service();
        let user = svc
            .register(registration("alice", "password123", "user"))
            .await
            .unwrap();
        assert_eq!(user.role_name, "student");

        let login = svc.login("alice", "password123").await.unwrap();
        let claims = JwtDecoder::new(&testing::auth_config())
            .verify(&login.token)
            .unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, "student");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let svc = service();
        svc.register(registration("bob", "password123", "teacher"))
            .await
            .unwrap();

        let wrong_password = svc.login("bob", "password124").await.unwrap_err();
        let unknown_user = svc.login("nobody", "password123").await.unwrap_err();

        assert_eq!(wrong_password.kind, ErrorKind::InvalidCredentials);
        assert_eq!(wrong_password.kind, unknown_user.kind);
        assert_eq!(wrong_password.message, unknown_user.message);
    }

    #[tokio::test]
    async fn test_unknown_user_costs_a_hash_verification() {
        let mut cfg = testing::auth_config();
        cfg.argon2_memory_kib = 4096;
        cfg.argon2_iterations = 2;
        let svc = CredentialService::new(
            Arc::new(MemoryStore::new()),
            Arc::new(PasswordHasher::new(&cfg).unwrap()),
            testing::validator(),
            testing::encoder(),
        );
        svc.register(registration("carl", "password123", "student"))
            .await
            .unwrap();

        let mut wrong_password = std::time::Duration::MAX;
        let mut unknown_user = std::time::Duration::MAX;
        for _ in 0..3 {
            let started = std::time::Instant::now();
            svc.login("carl", "password124").await.unwrap_err();
            wrong_password = wrong_password.min(started.elapsed());

            let started = std::time::Instant::now();
            svc.login("nobody", "password124").await.unwrap_err();
            unknown_user = unknown_user.min(started.elapsed());
        }

        assert!(
            unknown_user * 4 >= wrong_password,
            "unknown user took {unknown_user:?}, wrong password took {wrong_password:?}"
        );
    }

    #[tokio::test]
    async fn test_register_rejects_admin_and_unknown_roles() {
        let svc = service();
        for role in ["admin", "ADMIN", "superuser", ""] {
            let err = svc
                .register(registration("carol", "password123", role))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, "Invalid role name");
        }
    }

    #[tokio::test]
    async fn test_register_role_aliases() {
        let svc = service();
        let teacher = svc
            .register(registration("dora", "password123", "moderator"))
            .await
            .unwrap();
        assert_eq!(teacher.role_name, "teacher");
    }

    #[tokio::test]
    async fn test_register_password_bounds() {
        let svc = service();
        for (name, len, ok) in [("p7", 7, false), ("p8", 8, true), ("p32", 32, true), ("p33", 33, false)] {
            let result = svc
                .register(registration(name, &"x".repeat(len), "student"))
                .await;
            assert_eq!(result.is_ok(), ok, "length {len}");
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_is_conflict() {
        let svc = service();
        svc.register(registration("erin", "password123", "student"))
            .await
            .unwrap();
        let err = svc
            .register(registration("erin", "password123", "student"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_change_password() {
        let svc = service();
        let user = svc
            .register(registration("frank", "old-password", "student"))
            .await
            .unwrap();

        let err = svc
            .change_password(user.id, "not-the-password", "new-password")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
        assert!(svc.login("frank", "old-password").await.is_ok());

        let err = svc
            .change_password(user.id, "old-password", "short")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        svc.change_password(user.id, "old-password", "new-password")
            .await
            .unwrap();
        assert!(svc.login("frank", "new-password").await.is_ok());
        assert!(svc.login("frank", "old-password").await.is_err());
    }

    #[tokio::test]
    async fn test_change_password_for_missing_user() {
        let err = service()
            .change_password(UserId::new(), "whatever1", "whatever2")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
