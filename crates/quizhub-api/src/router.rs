//! Route definitions for the QuizHub HTTP API.
//!
//! Routes are grouped by audience: `/health` and the API docs are public,
//! `/auth` mixes public and authenticated routes, and `/cms` is admin-only.
//! Protected groups are wrapped with the role gate via `route_layer`, so
//! unmatched paths still return 404 without touching the token.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};

use quizhub_auth::{AllowedRoles, Authorizer};
use quizhub_entity::role::ADMIN_ROLE;

use crate::handlers;
use crate::middleware::auth::{RouteGuard, require_roles};
use crate::openapi::swagger_ui_router;
use crate::state::AppState;

/// Build the Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let authorizer = Arc::clone(&state.authorizer);

    Router::new()
        .merge(health_routes())
        .nest("/auth", auth_routes(&authorizer))
        .nest("/cms", cms_routes(&authorizer))
        .merge(swagger_ui_router())
        .with_state(state)
}

/// Wrap a route group with the role gate for `allowed`.
fn guarded(
    routes: Router<AppState>,
    authorizer: &Arc<Authorizer>,
    allowed: AllowedRoles,
) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        RouteGuard::new(Arc::clone(authorizer), allowed),
        require_roles,
    ))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Auth endpoints: login, register, change-password, current user
fn auth_routes(authorizer: &Arc<Authorizer>) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/register", post(handlers::auth::register));

    let authenticated = Router::new()
        .route("/change-password", put(handlers::auth::change_password))
        .route("/user", get(handlers::auth::current_user));

    public.merge(guarded(authenticated, authorizer, AllowedRoles::Any))
}

/// Admin-only user, role and category management
fn cms_routes(authorizer: &Arc<Authorizer>) -> Router<AppState> {
    use handlers::cms::{categories, roles, users};

    let routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/user", post(users::create_user))
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/roles", get(roles::list_roles))
        .route("/role", post(roles::create_role))
        .route(
            "/role/{id}",
            get(roles::get_role)
                .put(roles::rename_role)
                .delete(roles::delete_role),
        )
        .route("/categories", get(categories::list_categories))
        .route("/category", post(categories::create_category))
        .route(
            "/category/{id}",
            get(categories::get_category)
                .put(categories::rename_category)
                .delete(categories::delete_category),
        )
        .route(
            "/category/name/{name}",
            get(categories::get_category_by_name),
        );

    guarded(routes, authorizer, AllowedRoles::only([ADMIN_ROLE]))
}
