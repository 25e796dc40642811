//! Login, self-registration, and password change.

pub mod service;

pub use service::{CredentialService, LoginResult, RegisterUser};
