//! Role repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quizhub_core::error::{AppError, ErrorKind};
use quizhub_core::result::AppResult;
use quizhub_core::types::RoleId;
use quizhub_entity::role::Role;

use super::violated_constraint;
use crate::store::RoleStore;

/// Repository for role administration.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, name: &str, action: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some("roles_name_key") => AppError::conflict(format!("Role '{name}' already exists")),
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE deleted_at IS NULL ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list roles", e))
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        sqlx::query_as::<_, Role>("SELECT * FROM roles WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find role", e))
    }

    async fn create(&self, name: &str) -> AppResult<Role> {
        sqlx::query_as::<_, Role>("INSERT INTO roles (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, name, "Failed to create role"))
    }

    async fn rename(&self, id: RoleId, name: &str) -> AppResult<Role> {
        sqlx::query_as::<_, Role>(
            "UPDATE roles SET name = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, name, "Failed to rename role"))?
        .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))
    }

    async fn delete(&self, id: RoleId) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE roles SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL \
               AND NOT EXISTS ( \
                   SELECT 1 FROM users WHERE role_id = $1 AND deleted_at IS NULL \
               )",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete role", e))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        match self.find_by_id(id).await? {
            Some(_) => Err(AppError::conflict("Role is still assigned to users")),
            None => Err(AppError::not_found(format!("Role {id} not found"))),
        }
    }
}
