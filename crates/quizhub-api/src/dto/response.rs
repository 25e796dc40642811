//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use quizhub_core::types::{CategoryId, PageResponse, RoleId, UserId};
use quizhub_entity::category::Category;
use quizhub_entity::role::Role;
use quizhub_entity::user::User;

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` when returned with 200.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Active database provider.
    pub database: String,
}

/// Issued session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// Signed bearer token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Public view of an account. Carries no password material.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Role ID.
    pub role_id: RoleId,
    /// Role name.
    pub role_name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role_id: user.role_id,
            role_name: user.role_name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// `{ "user": .. }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    /// The account.
    pub user: UserResponse,
}

impl From<User> for UserEnvelope {
    fn from(user: User) -> Self {
        Self { user: user.into() }
    }
}

/// `{ "users": Page }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserPageEnvelope {
    /// One page of accounts.
    pub users: PageResponse<UserResponse>,
}

/// Role view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleResponse {
    /// Role ID.
    pub id: RoleId,
    /// Role name.
    pub name: String,
    /// Whether the role is built in and immutable.
    pub builtin: bool,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            builtin: role.is_builtin(),
            id: role.id,
            name: role.name,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

/// `{ "role": .. }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleEnvelope {
    /// The role.
    pub role: RoleResponse,
}

impl From<Role> for RoleEnvelope {
    fn from(role: Role) -> Self {
        Self { role: role.into() }
    }
}

/// `{ "roles": [..] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoleListEnvelope {
    /// All live roles.
    pub roles: Vec<RoleResponse>,
}

/// Category view.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Created at.
    pub created_at: DateTime<Utc>,
    /// Updated at.
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// `{ "category": .. }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryEnvelope {
    /// The category.
    pub category: CategoryResponse,
}

impl From<Category> for CategoryEnvelope {
    fn from(category: Category) -> Self {
        Self {
            category: category.into(),
        }
    }
}

/// `{ "categories": [..] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryListEnvelope {
    /// All live categories.
    pub categories: Vec<CategoryResponse>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
