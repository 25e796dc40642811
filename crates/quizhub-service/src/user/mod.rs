//! Account administration.

pub mod admin;

pub use admin::{AdminUpdateUserRequest, AdminUserService, CreateUserRequest};
