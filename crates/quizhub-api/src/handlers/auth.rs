//! Auth handlers: login, register, change-password, current user.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use quizhub_service::RegisterUser;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::dto::request::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::dto::response::{MessageResponse, TokenResponse, UserEnvelope};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = TokenResponse),
        (status = 400, description = "Invalid credentials or malformed body", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let result = state
        .credential_service
        .login(&req.username, &req.password)
        .await?;

    Ok(Json(TokenResponse {
        token: result.token,
        expires_at: result.expires_at,
    }))
}

/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Invalid input or role", body = ApiErrorResponse),
        (status = 409, description = "Username or email taken", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserEnvelope>)> {
    let user = state
        .credential_service
        .register(RegisterUser {
            username: req.username,
            email: req.email,
            password: req.password,
            role_name: req.role_name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// PUT /auth/change-password
#[utoipa::path(
    put,
    path = "/auth/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Wrong old password or invalid new password", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    state
        .credential_service
        .change_password(auth.user_id, &req.old_password, &req.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// GET /auth/user
#[utoipa::path(
    get,
    path = "/auth/user",
    responses(
        (status = 200, description = "Caller account", body = UserEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserEnvelope>> {
    let user = state.credential_service.current_user(auth.user_id).await?;
    Ok(Json(user.into()))
}
