//! OpenAPI document and Swagger UI.
//!
//! The document is generated with utoipa from the `#[utoipa::path]` annotations
//! on the handlers and the `ToSchema` derives on the DTOs. New endpoints
//! must be listed under `paths(...)` here, and their bodies under
//! `components(schemas(...))`.
//!
//! Served routes:
//! - `/api/docs` - Swagger UI
//! - `/api/openapi.json` - the raw OpenAPI JSON

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::dto::request::{
    CategoryRequest, ChangePasswordRequest, CreateUserRequest, LoginRequest, RegisterRequest,
    RoleRequest, UpdateUserRequest,
};
use crate::dto::response::{
    CategoryEnvelope, CategoryListEnvelope, CategoryResponse, HealthResponse, MessageResponse,
    RoleEnvelope, RoleListEnvelope, RoleResponse, TokenResponse, UserEnvelope, UserPageEnvelope,
    UserResponse,
};
use crate::error::ApiErrorResponse;
use crate::handlers;

/// Path of the Swagger UI.
pub const DOCS_PATH: &str = "/api/docs";
/// Path of the OpenAPI JSON document.
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Name of the bearer-token security scheme referenced by protected paths.
const BEARER_SCHEME: &str = "bearer_auth";

/// QuizHub API document.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QuizHub API",
        description = r#"
Authentication and content management API for QuizHub.

Protected endpoints take a session token from `POST /auth/login` in an
`Authorization: Bearer <token>` header. Everything under `/cms` requires
the `admin` role.
"#
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and database reachability"),
        (name = "auth", description = "Login, registration and the caller's account"),
        (name = "users", description = "Account management (admin)"),
        (name = "roles", description = "Role management (admin)"),
        (name = "categories", description = "Quiz category management (admin)")
    ),
    components(
        schemas(
            ApiErrorResponse,
            HealthResponse,
            MessageResponse,
            // auth
            LoginRequest,
            RegisterRequest,
            ChangePasswordRequest,
            TokenResponse,
            // users
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            UserEnvelope,
            UserPageEnvelope,
            // roles
            RoleRequest,
            RoleResponse,
            RoleEnvelope,
            RoleListEnvelope,
            // categories
            CategoryRequest,
            CategoryResponse,
            CategoryEnvelope,
            CategoryListEnvelope,
        )
    ),
    paths(
        handlers::health::health,
        handlers::auth::login,
        handlers::auth::register,
        handlers::auth::change_password,
        handlers::auth::current_user,
        handlers::cms::users::list_users,
        handlers::cms::users::create_user,
        handlers::cms::users::get_user,
        handlers::cms::users::update_user,
        handlers::cms::users::delete_user,
        handlers::cms::roles::list_roles,
        handlers::cms::roles::create_role,
        handlers::cms::roles::get_role,
        handlers::cms::roles::rename_role,
        handlers::cms::roles::delete_role,
        handlers::cms::categories::list_categories,
        handlers::cms::categories::create_category,
        handlers::cms::categories::get_category,
        handlers::cms::categories::get_category_by_name,
        handlers::cms::categories::rename_category,
        handlers::cms::categories::delete_category,
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Swagger UI plus the JSON document, mountable into any router state.
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new(DOCS_PATH)
        .url(OPENAPI_JSON_PATH, ApiDoc::openapi())
        .into()
}
