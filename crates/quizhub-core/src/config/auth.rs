//! Authentication configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Required, must be non-empty.
    pub jwt_secret: String,
    /// Session token lifetime in hours.
    #[serde(default = "default_token_lifespan")]
    pub token_lifespan_hours: u64,
    /// Minimum password length in characters.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Maximum password length in characters.
    #[serde(default = "default_password_max")]
    pub password_max_length: usize,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2 degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Administrator account ensured at startup.
    #[serde(default)]
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

/// Credentials of the administrator account seeded at startup.
#[derive(Clone, Serialize, Deserialize)]
pub struct BootstrapAdminConfig {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdminConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

impl AuthConfig {
    /// Create a config with the given secret and default settings.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            token_lifespan_hours: default_token_lifespan(),
            password_min_length: default_password_min(),
            password_max_length: default_password_max(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            bootstrap_admin: None,
        }
    }

    /// Configured token lifetime.
    pub fn token_lifespan(&self) -> chrono::Duration {
        let hours = i64::try_from(self.token_lifespan_hours).unwrap_or(i64::MAX);
        chrono::Duration::try_hours(hours).unwrap_or(chrono::Duration::MAX)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.token_lifespan_hours == 0 {
            return Err(AppError::configuration(
                "auth.token_lifespan_hours must be greater than zero",
            ));
        }
        if self.password_min_length == 0 || self.password_min_length > self.password_max_length {
            return Err(AppError::configuration(format!(
                "Invalid password bounds [{}, {}]",
                self.password_min_length, self.password_max_length
            )));
        }
        if let Some(admin) = &self.bootstrap_admin {
            if admin.username.trim().is_empty() || admin.password.is_empty() {
                return Err(AppError::configuration(
                    "auth.bootstrap_admin requires a username and password",
                ));
            }
        }
        Ok(())
    }
}

fn default_token_lifespan() -> u64 {
    24
}

fn default_password_min() -> usize {
    8
}

fn default_password_max() -> usize {
    32
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}
