//! Category management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use quizhub_core::types::CategoryId;

use crate::error::{ApiErrorResponse, ApiResult};
use crate::dto::request::CategoryRequest;
use crate::dto::response::{CategoryEnvelope, CategoryListEnvelope, MessageResponse};
use crate::extractors::{AuthUser, ValidatedJson, parse_id};
use crate::state::AppState;

/// GET /cms/categories
#[utoipa::path(
    get,
    path = "/cms/categories",
    responses(
        (status = 200, description = "All live categories", body = CategoryListEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<CategoryListEnvelope>> {
    let categories = state.category_service.list_categories().await?;
    Ok(Json(CategoryListEnvelope {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}

/// POST /cms/category
#[utoipa::path(
    post,
    path = "/cms/category",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryEnvelope),
        (status = 400, description = "Invalid name", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 409, description = "Name taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryEnvelope>)> {
    let category = state
        .category_service
        .create_category(&auth, &req.name)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// GET /cms/category/{id}
#[utoipa::path(
    get,
    path = "/cms/category/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category", body = CategoryEnvelope),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such category", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CategoryEnvelope>> {
    let id: CategoryId = parse_id(&id)?;
    let category = state.category_service.get_category(id).await?;
    Ok(Json(category.into()))
}

/// GET /cms/category/name/{name}
#[utoipa::path(
    get,
    path = "/cms/category/name/{name}",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Category", body = CategoryEnvelope),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such category", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn get_category_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<CategoryEnvelope>> {
    let category = state.category_service.get_category_by_name(&name).await?;
    Ok(Json(category.into()))
}

/// PUT /cms/category/{id}
#[utoipa::path(
    put,
    path = "/cms/category/{id}",
    params(("id" = String, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Renamed category", body = CategoryEnvelope),
        (status = 400, description = "Invalid name", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such category", body = ApiErrorResponse),
        (status = 409, description = "Name taken", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn rename_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<CategoryRequest>,
) -> ApiResult<Json<CategoryEnvelope>> {
    let id: CategoryId = parse_id(&id)?;
    let category = state
        .category_service
        .rename_category(&auth, id, &req.name)
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /cms/category/{id}
#[utoipa::path(
    delete,
    path = "/cms/category/{id}",
    params(("id" = String, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 400, description = "Malformed ID", body = ApiErrorResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ApiErrorResponse),
        (status = 403, description = "Role not permitted", body = ApiErrorResponse),
        (status = 404, description = "No such category", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id: CategoryId = parse_id(&id)?;
    state.category_service.delete_category(&auth, id).await?;
    Ok(Json(MessageResponse::new("Category deleted")))
}
