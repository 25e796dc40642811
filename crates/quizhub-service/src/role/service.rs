//! Role CRUD with protection for the seeded roles.

use std::sync::Arc;

use tracing::info;

use quizhub_auth::rbac::Principal;
use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::RoleId;
use quizhub_database::store::RoleStore;
use quizhub_entity::role::Role;

/// Longest accepted role name.
const MAX_ROLE_NAME: usize = 64;

/// Manages the role catalogue.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleStore>,
}

impl std::fmt::Debug for RoleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleService").finish_non_exhaustive()
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Role name cannot be empty"));
    }
    if name.chars().count() > MAX_ROLE_NAME {
        return Err(AppError::validation(format!(
            "Role name must be at most {MAX_ROLE_NAME} characters"
        )));
    }
    Ok(name.to_lowercase())
}

impl RoleService {
    /// Creates a new role service.
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// Lists live roles.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.roles.find_all().await
    }

    /// Gets a role by ID.
    pub async fn get_role(&self, id: RoleId) -> AppResult<Role> {
        self.roles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Role not found"))
    }

    /// Creates a role. Names are stored lowercase.
    pub async fn create_role(&self, actor: &Principal, name: &str) -> AppResult<Role> {
        let role = self.roles.create(&validate_name(name)?).await?;
        info!(actor_id = %actor.user_id, role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// Renames a role. The seeded roles keep their names.
    pub async fn rename_role(&self, actor: &Principal, id: RoleId, name: &str) -> AppResult<Role> {
        let name = validate_name(name)?;
        if id.is_builtin() {
            return Err(AppError::conflict("Built-in roles cannot be renamed"));
        }
        let role = self.roles.rename(id, &name).await?;
        info!(actor_id = %actor.user_id, role_id = %id, name = %role.name, "Role renamed");
        Ok(role)
    }

    /// Deletes a role that no live user holds. The seeded roles cannot be deleted.
    pub async fn delete_role(&self, actor: &Principal, id: RoleId) -> AppResult<()> {
        if id.is_builtin() {
            return Err(AppError::conflict("Built-in roles cannot be deleted"));
        }
        self.roles.delete(id).await?;
        info!(actor_id = %actor.user_id, role_id = %id, "Role deleted");
        Ok(())
    }
}
