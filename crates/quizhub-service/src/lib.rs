//! # quizhub-service
//!
//! Business logic service layer for QuizHub. Services apply the
//! application rules on top of the store traits and the auth primitives.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod category;
pub mod credential;
pub mod role;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use category::CategoryService;
pub use credential::{CredentialService, LoginResult, RegisterUser};
pub use role::RoleService;
pub use user::{AdminUpdateUserRequest, AdminUserService, CreateUserRequest};
