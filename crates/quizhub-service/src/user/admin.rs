//! Admin user management: CRUD, role assignment, and the bootstrap admin.

use std::sync::Arc;

use tracing::{info, warn};

use quizhub_auth::password::{PasswordHasher, PasswordValidator};
use quizhub_auth::rbac::Principal;
use quizhub_core::config::BootstrapAdminConfig;
use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::{PageRequest, PageResponse, RoleId, UserId};
use quizhub_database::store::UserStore;
use quizhub_entity::user::{CreateUser, UpdateUser, User};

/// Handles administrative user management operations.
#[derive(Clone)]
pub struct AdminUserService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

/// Request to create a user with any role.
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    /// Username (unique).
    pub username: String,
    /// Email (unique).
    pub email: String,
    /// Initial password.
    pub password: String,
    /// Role assignment.
    pub role_id: RoleId,
}

/// Partial update of a user by an admin.
#[derive(Debug, Clone, Default)]
pub struct AdminUpdateUserRequest {
    /// New username.
    pub username: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New password, hashed before storage.
    pub password: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
}

impl std::fmt::Debug for AdminUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminUserService").finish_non_exhaustive()
    }
}

fn non_blank(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Lists live users with pagination.
    pub async fn list_users(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        self.users.find_all(&page.normalized()).await
    }

    /// Gets a single user by ID.
    pub async fn get_user(&self, user_id: UserId) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Creates a user with any role, including `admin`.
    pub async fn create_user(&self, actor: &Principal, req: CreateUserRequest) -> AppResult<User> {
        let username = non_blank(&req.username, "Username")?;
        let email = non_blank(&req.email, "Email")?;
        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .users
            .create(&CreateUser {
                username,
                email,
                password_hash,
                role_id: req.role_id,
            })
            .await?;

        info!(
            actor_id = %actor.user_id,
            user_id = %user.id,
            role = %user.role_name,
            "Admin created user"
        );
        Ok(user)
    }

    /// Applies a partial update to a user.
    pub async fn update_user(
        &self,
        actor: &Principal,
        user_id: UserId,
        req: AdminUpdateUserRequest,
    ) -> AppResult<User> {
        let password_hash = match req.password.as_deref() {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };
        let update = UpdateUser {
            username: req
                .username
                .as_deref()
                .map(|u| non_blank(u, "Username"))
                .transpose()?,
            email: req
                .email
                .as_deref()
                .map(|e| non_blank(e, "Email"))
                .transpose()?,
            password_hash,
            role_id: req.role_id,
        };

        if update.is_empty() {
            return self.get_user(user_id).await;
        }

        let user = self.users.update(user_id, &update).await?;
        info!(actor_id = %actor.user_id, user_id = %user_id, "Admin updated user");
        Ok(user)
    }

    /// Soft-deletes a user.
    pub async fn delete_user(&self, actor: &Principal, user_id: UserId) -> AppResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(AppError::not_found("User not found"));
        }
        info!(actor_id = %actor.user_id, user_id = %user_id, "Admin deleted user");
        Ok(())
    }

    /// Make sure the configured administrator account exists.
    ///
    /// An account already holding the username is left untouched. Returns
    /// the account when one was created.
    pub async fn ensure_bootstrap_admin(
        &self,
        admin: &BootstrapAdminConfig,
    ) -> AppResult<Option<User>> {
        if let Some(existing) = self.users.find_by_username(&admin.username).await? {
            if !existing.is_admin() {
                warn!(
                    user_id = %existing.id,
                    role = %existing.role_name,
                    "Bootstrap admin username is held by a non-admin account"
                );
                return Ok(None);
            }
            info!(
                user_id = %existing.id,
                username = %existing.username,
                "Bootstrap admin already present"
            );
            return Ok(None);
        }

        self.validator.validate(&admin.password)?;
        let password_hash = self.hasher.hash_password(&admin.password)?;
        let user = self
            .users
            .create(&CreateUser {
                username: non_blank(&admin.username, "Username")?,
                email: non_blank(&admin.email, "Email")?,
                password_hash,
                role_id: RoleId::ADMIN,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "Bootstrap admin created");
        Ok(Some(user))
    }
}
