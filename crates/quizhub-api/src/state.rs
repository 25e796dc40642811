//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use quizhub_auth::{Authorizer, JwtDecoder, JwtEncoder, PasswordHasher, PasswordValidator};
use quizhub_core::config::AppConfig;
use quizhub_core::result::AppResult;
use quizhub_database::Stores;
use quizhub_service::{AdminUserService, CategoryService, CredentialService, RoleService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Backing stores for the configured provider
    pub stores: Stores,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer verification and role gate
    pub authorizer: Arc<Authorizer>,

    // ── Services ─────────────────────────────────────────────
    /// Login, registration and password changes
    pub credential_service: Arc<CredentialService>,
    /// Admin user management
    pub admin_user_service: Arc<AdminUserService>,
    /// Role management
    pub role_service: Arc<RoleService>,
    /// Category management
    pub category_service: Arc<CategoryService>,
}

impl AppState {
    /// Wire the auth primitives and services over `stores`.
    ///
    /// The signing secret and password policy are read from `config` once
    /// here and never re-read.
    pub fn new(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let password_hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = JwtDecoder::new(&config.auth);

        let authorizer = Arc::new(Authorizer::new(jwt_decoder, Arc::clone(&stores.users)));

        let credential_service = Arc::new(CredentialService::new(
            Arc::clone(&stores.users),
            Arc::clone(&password_hasher),
            Arc::clone(&password_validator),
            jwt_encoder,
        ));
        let admin_user_service = Arc::new(AdminUserService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_validator,
        ));
        let role_service = Arc::new(RoleService::new(Arc::clone(&stores.roles)));
        let category_service = Arc::new(CategoryService::new(Arc::clone(&stores.categories)));

        Ok(Self {
            config: Arc::new(config),
            stores,
            authorizer,
            credential_service,
            admin_user_service,
            role_service,
            category_service,
        })
    }
}
