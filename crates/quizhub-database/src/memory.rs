//! In-process store used for local runs and tests.
//!
//! All tables live behind a single [`RwLock`], so every uniqueness check
//! and the write it guards happen under the same exclusive lock.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use quizhub_core::error::AppError;
use quizhub_core::result::AppResult;
use quizhub_core::types::{CategoryId, PageRequest, PageResponse, RoleId, UserId};
use quizhub_entity::category::Category;
use quizhub_entity::role::{BuiltinRole, Role};
use quizhub_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{CategoryStore, RoleStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    roles: HashMap<RoleId, Role>,
    categories: HashMap<CategoryId, Category>,
}

impl Tables {
    fn live_role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id).filter(|r| r.deleted_at.is_none())
    }

    fn username_taken(&self, username: &str, except: Option<UserId>) -> bool {
        self.users.values().any(|u| {
            u.deleted_at.is_none()
                && Some(u.id) != except
                && u.username.eq_ignore_ascii_case(username)
        })
    }

    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users.values().any(|u| {
            u.deleted_at.is_none() && Some(u.id) != except && u.email.eq_ignore_ascii_case(email)
        })
    }

    fn role_name_taken(&self, name: &str, except: Option<RoleId>) -> bool {
        self.roles.values().any(|r| {
            r.deleted_at.is_none() && Some(r.id) != except && r.name.eq_ignore_ascii_case(name)
        })
    }

    fn category_name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories.values().any(|c| {
            c.deleted_at.is_none() && Some(c.id) != except && c.name.eq_ignore_ascii_case(name)
        })
    }
}

/// In-memory implementation of every store trait.
///
/// Cloning shares the underlying tables. A new store is seeded with the
/// built-in roles under their fixed identifiers.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store holding only the built-in roles.
    pub fn new() -> Self {
        let now = Utc::now();
        let roles = [BuiltinRole::Admin, BuiltinRole::Student, BuiltinRole::Teacher]
            .into_iter()
            .map(|builtin| {
                let role = Role {
                    id: builtin.id(),
                    name: builtin.as_str().to_string(),
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                };
                (role.id, role)
            })
            .collect();

        Self {
            tables: Arc::new(RwLock::new(Tables {
                roles,
                ..Tables::default()
            })),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).filter(|u| !u.is_deleted()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| !u.is_deleted() && u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| !u.is_deleted())
            .cloned()
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = users.len() as u64;
        let items = users
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        if tables.username_taken(&data.username, None) {
            return Err(AppError::conflict("Username already exists"));
        }
        if tables.email_taken(&data.email, None) {
            return Err(AppError::conflict("Email already in use"));
        }
        let role_name = tables
            .live_role(data.role_id)
            .map(|r| r.name.clone())
            .ok_or_else(|| AppError::validation("Unknown role"))?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role_id: data.role_id,
            role_name,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, data: &UpdateUser) -> AppResult<User> {
        let mut tables = self.tables.write().await;

        if !tables.users.get(&id).is_some_and(|u| !u.is_deleted()) {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        if let Some(username) = &data.username {
            if tables.username_taken(username, Some(id)) {
                return Err(AppError::conflict("Username already exists"));
            }
        }
        if let Some(email) = &data.email {
            if tables.email_taken(email, Some(id)) {
                return Err(AppError::conflict("Email already in use"));
            }
        }
        let role = match data.role_id {
            Some(role_id) => Some(
                tables
                    .live_role(role_id)
                    .map(|r| (r.id, r.name.clone()))
                    .ok_or_else(|| AppError::validation("Unknown role"))?,
            ),
            None => None,
        };

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if let Some(username) = &data.username {
            user.username = username.clone();
        }
        if let Some(email) = &data.email {
            user.email = email.clone();
        }
        if let Some(hash) = &data.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some((role_id, role_name)) = role {
            user.role_id = role_id;
            user.role_name = role_name;
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id) {
            Some(user) if !user.is_deleted() => {
                let now = Utc::now();
                user.deleted_at = Some(now);
                user.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Role>> {
        let tables = self.tables.read().await;
        let mut roles: Vec<Role> = tables
            .roles
            .values()
            .filter(|r| r.deleted_at.is_none())
            .cloned()
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(roles)
    }

    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        let tables = self.tables.read().await;
        Ok(tables.live_role(id).cloned())
    }

    async fn create(&self, name: &str) -> AppResult<Role> {
        let mut tables = self.tables.write().await;
        if tables.role_name_taken(name, None) {
            return Err(AppError::conflict(format!("Role '{name}' already exists")));
        }
        let now = Utc::now();
        let role = Role {
            id: RoleId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn rename(&self, id: RoleId, name: &str) -> AppResult<Role> {
        let mut tables = self.tables.write().await;
        if tables.live_role(id).is_none() {
            return Err(AppError::not_found(format!("Role {id} not found")));
        }
        if tables.role_name_taken(name, Some(id)) {
            return Err(AppError::conflict(format!("Role '{name}' already exists")));
        }

        let Tables { users, roles, .. } = &mut *tables;
        let role = roles
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Role {id} not found")))?;
        role.name = name.to_string();
        role.updated_at = Utc::now();

        // Joined role names are materialized on user rows here.
        for user in users.values_mut().filter(|u| u.role_id == id) {
            user.role_name = role.name.clone();
        }
        Ok(role.clone())
    }

    async fn delete(&self, id: RoleId) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.live_role(id).is_none() {
            return Err(AppError::not_found(format!("Role {id} not found")));
        }
        if tables
            .users
            .values()
            .any(|u| !u.is_deleted() && u.role_id == id)
        {
            return Err(AppError::conflict("Role is still assigned to users"));
        }
        if let Some(role) = tables.roles.get_mut(&id) {
            let now = Utc::now();
            role.deleted_at = Some(now);
            role.updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| c.deleted_at.is_none())
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .get(&id)
            .filter(|c| c.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .values()
            .find(|c| c.deleted_at.is_none() && c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn create(&self, name: &str) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        if tables.category_name_taken(name, None) {
            return Err(AppError::conflict(format!(
                "Category '{name}' already exists"
            )));
        }
        let now = Utc::now();
        let category = Category {
            id: CategoryId::new(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn rename(&self, id: CategoryId, name: &str) -> AppResult<Category> {
        let mut tables = self.tables.write().await;
        if tables.category_name_taken(name, Some(id)) {
            return Err(AppError::conflict(format!(
                "Category '{name}' already exists"
            )));
        }
        let category = tables
            .categories
            .get_mut(&id)
            .filter(|c| c.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Category {id} not found")))?;
        category.name = name.to_string();
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.categories.get_mut(&id) {
            Some(category) if category.deleted_at.is_none() => {
                let now = Utc::now();
                category.deleted_at = Some(now);
                category.updated_at = now;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
