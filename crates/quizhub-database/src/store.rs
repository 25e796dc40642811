//! Persistence traits the service layer is written against.
//!
//! Every read skips soft-deleted rows. Uniqueness is enforced by the
//! backend itself: implementations report a duplicate as
//! [`ErrorKind::Conflict`](quizhub_core::ErrorKind::Conflict) instead of
//! relying on callers to check first.

use async_trait::async_trait;

use quizhub_core::result::AppResult;
use quizhub_core::types::{CategoryId, PageRequest, PageResponse, RoleId, UserId};
use quizhub_entity::category::Category;
use quizhub_entity::role::Role;
use quizhub_entity::user::{CreateUser, UpdateUser, User};

/// Account storage.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a live user by primary key.
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    /// Find a live user by username (case-insensitive).
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// List live users, newest first.
    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>>;

    /// Insert a user.
    ///
    /// A taken username or email yields `Conflict`; an unknown role yields
    /// `Validation`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply a partial update. `NotFound` if the user is gone; `Validation`
    /// if the new role does not exist or was soft-deleted.
    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<User>;

    /// Soft-delete a user. Returns `false` if there was nothing to delete.
    async fn delete(&self, id: UserId) -> AppResult<bool>;
}

/// Role storage.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// List live roles ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Role>>;

    /// Find a live role by primary key.
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>>;

    /// Insert a role. A taken name yields `Conflict`.
    async fn create(&self, name: &str) -> AppResult<Role>;

    /// Rename a role. `NotFound` if gone, `Conflict` if the name is taken.
    async fn rename(&self, id: RoleId, name: &str) -> AppResult<Role>;

    /// Soft-delete a role.
    ///
    /// `NotFound` if gone, `Conflict` while live users are still assigned.
    async fn delete(&self, id: RoleId) -> AppResult<()>;
}

/// Category storage.
#[async_trait]
pub trait CategoryStore: Send + Sync + 'static {
    /// List live categories ordered by name.
    async fn find_all(&self) -> AppResult<Vec<Category>>;

    /// Find a live category by primary key.
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>>;

    /// Find a live category by name (case-insensitive).
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// Insert a category. A taken name yields `Conflict`.
    async fn create(&self, name: &str) -> AppResult<Category>;

    /// Rename a category. `NotFound` if gone, `Conflict` if the name is taken.
    async fn rename(&self, id: CategoryId, name: &str) -> AppResult<Category>;

    /// Soft-delete a category. Returns `false` if there was nothing to delete.
    async fn delete(&self, id: CategoryId) -> AppResult<bool>;
}
