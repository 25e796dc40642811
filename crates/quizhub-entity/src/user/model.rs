//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use quizhub_core::types::{RoleId, UserId};

use crate::role::ADMIN_ROLE;

/// A registered account, read together with the name of its role.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Argon2 password hash. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Assigned role.
    pub role_id: RoleId,
    /// Name of the assigned role, joined from `roles`.
    pub role_name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if this user holds the superuser role.
    pub fn is_admin(&self) -> bool {
        self.role_name == ADMIN_ROLE
    }

    /// Check if the account has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role_id: RoleId,
}

/// Partial update of an existing user. `None` leaves a column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
}

impl UpdateUser {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.role_id.is_none()
    }
}
