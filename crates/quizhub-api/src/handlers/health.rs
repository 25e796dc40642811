//! Health check handler.

use axum::Json;
use axum::extract::State;


use crate::error::{ApiErrorResponse, ApiResult};
use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /health
///
/// 503 when the database cannot be reached.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = ApiErrorResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.stores.health_check().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: state.stores.provider_name().to_string(),
    }))
}
