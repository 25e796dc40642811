//! # quizhub-api
//!
//! HTTP API layer for QuizHub built on Axum.
//!
//! Provides the REST endpoints, the role gate middleware, CORS and
//! request logging, extractors, DTOs, error mapping, and the OpenAPI
//! document served through Swagger UI.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
