//! Shared fixtures for service tests.

use std::sync::Arc;

use quizhub_auth::{JwtEncoder, PasswordHasher, PasswordValidator};
use quizhub_core::config::AuthConfig;

/// Auth config with Argon2 costs low enough for tests.
pub fn auth_config() -> AuthConfig {
    let mut cfg = AuthConfig::with_secret("service-test-secret");
    cfg.argon2_memory_kib = 8;
    cfg.argon2_iterations = 1;
    cfg
}

pub fn hasher() -> Arc<PasswordHasher> {
    Arc::new(PasswordHasher::new(&auth_config()).expect("argon2 params"))
}

pub fn validator() -> Arc<PasswordValidator> {
    Arc::new(PasswordValidator::new(&auth_config()))
}

pub fn encoder() -> Arc<JwtEncoder> {
    Arc::new(JwtEncoder::new(&auth_config()))
}
