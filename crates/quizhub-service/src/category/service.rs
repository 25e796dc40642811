//! Category CRUD.

use std::sync::Arc;

use tracing::info;

use quizhub_auth::rbac::Principal;
use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::CategoryId;
use quizhub_database::store::CategoryStore;
use quizhub_entity::category::Category;

const MAX_CATEGORY_NAME: usize = 255;

/// Manages quiz categories.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl std::fmt::Debug for CategoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryService").finish_non_exhaustive()
    }
}

fn validate_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Category name cannot be empty"));
    }
    if name.chars().count() > MAX_CATEGORY_NAME {
        return Err(AppError::validation(format!(
            "Category name must be at most {MAX_CATEGORY_NAME} characters"
        )));
    }
    Ok(name)
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// Lists live categories.
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    /// Gets a category by ID.
    pub async fn get_category(&self, id: CategoryId) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Gets a category by name (case-insensitive).
    pub async fn get_category_by_name(&self, name: &str) -> AppResult<Category> {
        self.categories
            .find_by_name(name.trim())
            .await?
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category.
    pub async fn create_category(&self, actor: &Principal, name: &str) -> AppResult<Category> {
        let category = self.categories.create(validate_name(name)?).await?;
        info!(
            actor_id = %actor.user_id,
            category_id = %category.id,
            name = %category.name,
            "Category created"
        );
        Ok(category)
    }

    /// Renames a category.
    pub async fn rename_category(
        &self,
        actor: &Principal,
        id: CategoryId,
        name: &str,
    ) -> AppResult<Category> {
        let category = self.categories.rename(id, validate_name(name)?).await?;
        info!(actor_id = %actor.user_id, category_id = %id, name = %category.name, "Category renamed");
        Ok(category)
    }

    /// Soft-deletes a category.
    pub async fn delete_category(&self, actor: &Principal, id: CategoryId) -> AppResult<()> {
        if !self.categories.delete(id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        info!(actor_id = %actor.user_id, category_id = %id, "Category deleted");
        Ok(())
    }
}
