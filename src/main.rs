//! QuizHub Server
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use quizhub_api::AppState;
use quizhub_core::config::AppConfig;
use quizhub_core::error::AppError;
use quizhub_database::Stores;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load and validate configuration for the environment in `QUIZHUB_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("QUIZHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = AppConfig::load(&env)?;
    config.validate()?;
    Ok(config)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        provider = ?config.database.provider,
        "Starting QuizHub"
    );

    // ── Step 1: Open stores (connect + migrate) ──────────────────
    let stores = Stores::open(&config.database).await?;
    tracing::info!(provider = stores.provider_name(), "Stores ready");

    // ── Step 2: Wire auth and services ───────────────────────────
    let bootstrap = config.auth.bootstrap_admin.clone();
    let state = AppState::new(config, stores.clone())?;

    // ── Step 3: Bootstrap administrator ──────────────────────────
    if let Some(admin) = bootstrap {
        state.admin_user_service.ensure_bootstrap_admin(&admin).await?;
    } else {
        tracing::info!("No bootstrap admin configured");
    }

    // ── Step 4: Serve until shutdown ─────────────────────────────
    let result = quizhub_api::run_server(state).await;

    // ── Step 5: Release resources ────────────────────────────────
    stores.close().await;
    result
}

