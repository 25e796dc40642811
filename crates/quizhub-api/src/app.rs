//! Application builder: wires router, middleware and state into an Axum app,
//! and runs it.

use std::future::pending;
use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use quizhub_core::error::AppError;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TimeoutLayer::new(Duration::from_secs(
            server.request_timeout_seconds,
        )))
        .layer(build_cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until a shutdown signal arrives.
pub async fn run_server(state: AppState) -> Result<(), AppError> {
    let addr = state.config.server.bind_address();
    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            quizhub_core::ErrorKind::Internal,
            format!("Failed to bind {addr}"),
            e,
        )
    })?;
    tracing::info!(address = %addr, "QuizHub listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("QuizHub stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(tokio::signal::ctrl_c(), "Ctrl+C");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

/// Resolves when `signal` fires. A handler that fails to install never
/// resolves, so the server keeps running instead of shutting down.
async fn wait_for_signal<F>(signal: F, name: &str)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "Failed to install signal handler");
        pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_signal_handler_failure_does_not_shut_down() {
        let failed = async { Err(std::io::Error::other("no signal support")) };
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_signal(failed, "Ctrl+C"),
        )
        .await;
        assert!(waited.is_err(), "a failed handler must not trigger shutdown");
    }

    #[tokio::test]
    async fn test_delivered_signal_resolves() {
        let delivered = async { Ok(()) };
        let waited = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_signal(delivered, "Ctrl+C"),
        )
        .await;
        assert!(waited.is_ok());
    }
}
