//! Password length policy.

use quizhub_core::config::AuthConfig;
use quizhub_core::error::AppError;

/// Enforces the configured password length bounds, counted in characters.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    max_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            max_length: config.password_max_length,
        }
    }

    /// Accepts passwords whose length lies within the inclusive bounds.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length || length > self.max_length {
            return Err(AppError::validation(format!(
                "Password must be between {} and {} characters",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}
