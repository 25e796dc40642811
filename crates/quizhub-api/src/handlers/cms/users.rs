//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quizhub_core::types::UserId;
use quizhub_service::{AdminUpdateUserRequest, CreateUserRequest as SvcCreateUser};

use crate::error::{ApiErrorResponse, ApiResult};
use crate::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::dto::response::{MessageResponse, UserEnvelope, UserPageEnvelope};
use crate::extractors::{AuthUser, Pagination, PaginationParams, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /cms/users
#[utoipa::path(
    get,
    path = "/cms/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of accounts", body = UserPageEnvelope),
        (status = 400, description = "Invalid paging parameters", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<Json<UserPageEnvelope>> {
    let users = state.admin_user_service.list_users(&page).await?;
    Ok(Json(UserPageEnvelope {
        users: users.map(Into::into),
    }))
}

/// POST /cms/user
#[utoipa::path(
    post,
    path = "/cms/user",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Invalid input or unknown role", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 409, description = "Username or email taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserEnvelope>)> {
    let user = state
        .admin_user_service
        .create_user(
            &auth,
            SvcCreateUser {
                username: req.username,
                email: req.email,
                password: req.password,
                role_id: req.role_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /cms/user/{id}
#[utoipa::path(
    get,
    path = "/cms/user/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account", body = UserEnvelope),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such account", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserEnvelope>> {
    let id: UserId = parse_id(&id)?;
    let user = state.admin_user_service.get_user(id).await?;
    Ok(Json(user.into()))
}

/// PUT /cms/user/{id}
#[utoipa::path(
    put,
    path = "/cms/user/{id}",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated account", body = UserEnvelope),
        (status = 400, description = "Invalid input or unknown role", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such account", body = ApiErrorResponse),
        (status = 409, description = "Username or email taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<UserEnvelope>> {
    let id: UserId = parse_id(&id)?;
    let user = state
        .admin_user_service
        .update_user(
            &auth,
            id,
            AdminUpdateUserRequest {
                username: req.username,
                email: req.email,
                password: req.password,
                role_id: req.role_id,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /cms/user/{id}
#[utoipa::path(
    delete,
    path = "/cms/user/{id}",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such account", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: UserId = parse_id(&id)?;
    state.admin_user_service.delete_user(&auth, id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
