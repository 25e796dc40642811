//! Category repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use quizhub_core::error::{AppError, ErrorKind};
use quizhub_core::result::AppResult;
use quizhub_core::types::CategoryId;
use quizhub_entity::category::Category;

use super::violated_constraint;
use crate::store::CategoryStore;

/// Repository for quiz categories.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, name: &str, action: &'static str) -> AppError {
    match violated_constraint(&e) {
        Some("categories_name_key") => {
            AppError::conflict(format!("Category '{name}' already exists"))
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE deleted_at IS NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE LOWER(name) = LOWER($1) AND deleted_at IS NULL",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find category by name", e)
        })
    }

    async fn create(&self, name: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error(e, name, "Failed to create category"))
    }

    async fn rename(&self, id: CategoryId, name: &str) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, name, "Failed to rename category"))?
        .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete category", e))?;

        Ok(result.rows_affected() > 0)
    }
}
