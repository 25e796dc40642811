//! # quizhub-auth
//!
//! Authentication and authorization for QuizHub.
//!
//! ## Modules
//!
//! - `jwt`: session token issuance and verification (HS256)
//! - `password`: Argon2id password hashing and length policy
//! - `rbac`: bearer extraction and the per-route role gate

pub mod jwt;
pub mod password;
pub mod rbac;

pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenError};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::{AllowedRoles, Authorizer, Principal};
