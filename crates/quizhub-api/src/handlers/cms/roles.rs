//! Role management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quizhub_core::types::RoleId;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::dto::request::RoleRequest;
use crate::dto::response::{MessageResponse, RoleEnvelope, RoleListEnvelope};
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /cms/roles
#[utoipa::path(
    get,
    path = "/cms/roles",
    responses(
        (status = 200, description = "All live roles", body = RoleListEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn list_roles(State(state): State<AppState>) -> ApiResult<Json<RoleListEnvelope>> {
    let roles = state.role_service.list_roles().await?;
    Ok(Json(RoleListEnvelope {
        roles: roles.into_iter().map(Into::into).collect(),
    }))
}

/// POST /cms/role
#[utoipa::path(
    post,
    path = "/cms/role",
    request_body = RoleRequest,
    responses(
        (status = 201, description = "Role created", body = RoleEnvelope),
        (status = 400, description = "Invalid name", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 409, description = "Name taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn create_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleEnvelope>)> {
    let role = state.role_service.create_role(&auth, &req.name).await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

/// GET /cms/role/{id}
#[utoipa::path(
    get,
    path = "/cms/role/{id}",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role", body = RoleEnvelope),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such role", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<RoleEnvelope>> {
    let id: RoleId = parse_id(&id)?;
    let role = state.role_service.get_role(id).await?;
    Ok(Json(role.into()))
}

/// PUT /cms/role/{id}
#[utoipa::path(
    put,
    path = "/cms/role/{id}",
    params(("id" = String, Path, description = "Role ID")),
    request_body = RoleRequest,
    responses(
        (status = 200, description = "Renamed role", body = RoleEnvelope),
        (status = 400, description = "Invalid name or malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such role", body = ApiErrorResponse),
        (status = 409, description = "Name taken or built-in role", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn rename_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<RoleRequest>,
) -> ApiResult<Json<RoleEnvelope>> {
    let id: RoleId = parse_id(&id)?;
    let role = state.role_service.rename_role(&auth, id, &req.name).await?;
    Ok(Json(role.into()))
}

/// DELETE /cms/role/{id}
#[utoipa::path(
    delete,
    path = "/cms/role/{id}",
    params(("id" = String, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such role", body = ApiErrorResponse),
        (status = 409, description = "Built-in role or still assigned", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "roles"
)]
pub async fn delete_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: RoleId = parse_id(&id)?;
    state.role_service.delete_role(&auth, id).await?;
    Ok(Json(MessageResponse::new("Role deleted")))
}
