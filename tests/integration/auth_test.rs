//! Integration tests for the authentication flow.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_login_change_password_flow() {
    let app = TestApp::new().await;
    let user_id = app.register("alice", "first-pass", "student").await;

    let token = app.login("alice", "first-pass").await;

    let me = app.request("GET", "/auth/user", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["id"], user_id.as_str());
    assert_eq!(me.body["user"]["role_name"], "student");
    let user = me.body["user"].as_object().expect("user object");
    assert!(!user.contains_key("password"));
    assert!(!user.contains_key("password_hash"));

    let wrong = app
        .request(
            "PUT",
            "/auth/change-password",
            Some(json!({ "old_password": "not-it", "new_password": "second-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.error_code(), "INVALID_CREDENTIALS");
    app.login("alice", "first-pass").await;

    let changed = app
        .request(
            "PUT",
            "/auth/change-password",
            Some(json!({ "old_password": "first-pass", "new_password": "second-pass" })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert!(changed.body["message"].is_string());

    app.login("alice", "second-pass").await;
    let old = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "alice", "password": "first-pass" })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    app.register("bob", "bob-password", "teacher").await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "bob", "password": "nope-nope" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/auth/login",
            Some(json!({ "username": "nobody", "password": "nope-nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status, unknown_user.status);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn test_password_length_bounds() {
    let app = TestApp::new().await;

    for (name, length, expected) in [
        ("len7", 7, StatusCode::BAD_REQUEST),
        ("len8", 8, StatusCode::CREATED),
        ("len32", 32, StatusCode::CREATED),
        ("len33", 33, StatusCode::BAD_REQUEST),
    ] {
        let response = app
            .request(
                "POST",
                "/auth/register",
                Some(json!({
                    "username": name,
                    "email": format!("{name}@quizhub.test"),
                    "password": "p".repeat(length),
                    "role_name": "student",
                })),
                None,
            )
            .await;
        assert_eq!(response.status, expected, "password of length {length}");
    }
}

#[tokio::test]
async fn test_register_rejects_unknown_role_and_bad_body() {
    let app = TestApp::new().await;

    let admin = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "username": "sneaky",
                "email": "sneaky@quizhub.test",
                "password": "long-enough",
                "role_name": "admin",
            })),
            None,
        )
        .await;
    assert_eq!(admin.status, StatusCode::BAD_REQUEST);
    assert_eq!(admin.error_code(), "VALIDATION_ERROR");

    let missing = app
        .request("POST", "/auth/register", Some(json!({ "username": "x" })), None)
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_concurrent_registration_conflicts_once() {
    let app = TestApp::new().await;
    let body = json!({
        "username": "twin",
        "email": "twin@quizhub.test",
        "password": "twin-password",
        "role_name": "student",
    });

    let (a, b) = tokio::join!(
        app.request("POST", "/auth/register", Some(body.clone()), None),
        app.request("POST", "/auth/register", Some(body), None),
    );

    let mut statuses = [a.status, b.status];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
}

#[tokio::test]
async fn test_authenticated_routes_require_token() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/auth/user", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/auth/user", None, Some("not.a.token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let change = app
        .request(
            "PUT",
            "/auth/change-password",
            Some(json!({ "old_password": "a", "new_password": "b" })),
            None,
        )
        .await;
    assert_eq!(change.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_provider() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
}

#[tokio::test]
async fn test_api_docs_are_public() {
    let app = TestApp::new().await;

    let spec = app.request("GET", "/api/openapi.json", None, None).await;
    assert_eq!(spec.status, StatusCode::OK);
    assert!(spec.body["openapi"].as_str().is_some_and(|v| v.starts_with("3.")));
    assert!(spec.body["paths"]["/auth/login"]["post"].is_object());
    assert!(spec.body["paths"]["/cms/user/{id}"]["delete"].is_object());

    let ui = app.request("GET", "/api/docs/", None, None).await;
    assert_eq!(ui.status, StatusCode::OK);
}
