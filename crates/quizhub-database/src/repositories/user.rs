//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quizhub_core::error::{AppError, ErrorKind};
use quizhub_core::result::AppResult;
use quizhub_core::types::{PageRequest, PageResponse, UserId};
use quizhub_entity::user::{CreateUser, UpdateUser, User};

use super::violated_constraint;
use crate::store::UserStore;

/// Columns of a user row joined with its role name.
const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password_hash, u.role_id, \
                            r.name AS role_name, u.created_at, u.updated_at, u.deleted_at";

/// Inserts a user only when the target role exists and is not soft-deleted.
const CREATE_USER_SQL: &str = "WITH u AS ( \
         INSERT INTO users (username, email, password_hash, role_id) \
         SELECT $1, $2, $3, r.id FROM roles r \
         WHERE r.id = $4 AND r.deleted_at IS NULL \
         RETURNING * \
     ) \
     SELECT u.id, u.username, u.email, u.password_hash, u.role_id, \
            r.name AS role_name, u.created_at, u.updated_at, u.deleted_at \
     FROM u JOIN roles r ON r.id = u.role_id";

/// Updates a live user. A new role must exist and not be soft-deleted.
const UPDATE_USER_SQL: &str = "WITH u AS ( \
         UPDATE users SET username = COALESCE($2, username), \
                          email = COALESCE($3, email), \
                          password_hash = COALESCE($4, password_hash), \
                          role_id = COALESCE($5, role_id), \
                          updated_at = NOW() \
         WHERE id = $1 AND deleted_at IS NULL \
           AND ($5::uuid IS NULL OR EXISTS ( \
               SELECT 1 FROM roles WHERE id = $5 AND deleted_at IS NULL)) \
         RETURNING * \
     ) \
     SELECT u.id, u.username, u.email, u.password_hash, u.role_id, \
            r.name AS role_name, u.created_at, u.updated_at, u.deleted_at \
     FROM u JOIN roles r ON r.id = u.role_id";

/// Repository for user CRUD and query operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate constraint violations on `users` into domain errors.
fn map_write_error(e: sqlx::Error, action: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some("users_username_key") => AppError::conflict("Username already exists"),
        Some("users_email_key") => AppError::conflict("Email already in use"),
        Some("users_role_id_fkey") => AppError::validation("Unknown role"),
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE u.id = $1 AND u.deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE LOWER(u.username) = LOWER($1) AND u.deleted_at IS NULL"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
        })
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u JOIN roles r ON r.id = u.role_id \
             WHERE u.deleted_at IS NULL \
             ORDER BY u.created_at DESC LIMIT $1 OFFSET $2"
        ))
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(users, page, total as u64))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(CREATE_USER_SQL)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(data.role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to create user"))?
            .ok_or_else(|| AppError::validation("Unknown role"))
    }

    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        let updated = sqlx::query_as::<_, User>(UPDATE_USER_SQL)
            .bind(id)
            .bind(&data.username)
            .bind(&data.email)
            .bind(&data.password_hash)
            .bind(data.role_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Failed to update user"))?;

        match updated {
            Some(user) => Ok(user),
            // No row means either the user is gone or the new role is.
            None if self.find_by_id(id).await?.is_some() => {
                Err(AppError::validation("Unknown role"))
            }
            None => Err(AppError::not_found(format!("User {id} not found"))),
        }
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_require_live_role() {
        assert!(CREATE_USER_SQL.contains("WHERE r.id = $4 AND r.deleted_at IS NULL"));
        assert!(UPDATE_USER_SQL.contains("SELECT 1 FROM roles WHERE id = $5 AND deleted_at IS NULL"));
    }
}
