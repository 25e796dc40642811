//! Request DTOs with validation.
//!
//! Password length bounds are configurable and checked by the services,
//! so the rules here only require the fields to be present.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use quizhub_core::types::RoleId;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Requested role: `student`, `user`, `teacher`, or `moderator`.
    #[validate(length(min = 1, message = "Role name is required"))]
    pub role_name: String,
}

/// Password change request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,
    /// New password.
    pub new_password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Email is not valid"))]
    pub email: String,
    /// Password.
    pub password: String,
    /// Role to assign.
    pub role_id: RoleId,
}

/// Update user request (admin). Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New username.
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,
    /// New email.
    #[validate(email(message = "Email is not valid"))]
    pub email: Option<String>,
    /// New password.
    pub password: Option<String>,
    /// New role.
    pub role_id: Option<RoleId>,
}

/// Create or rename a role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RoleRequest {
    /// Role name.
    #[validate(length(min = 1, max = 64, message = "Role name must be 1-64 characters"))]
    pub name: String,
}

/// Create or rename a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRequest {
    /// Category name.
    #[validate(length(min = 1, max = 128, message = "Category name must be 1-128 characters"))]
    pub name: String,
}
