//! Integration tests for the admin-only management routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const TEACHER_ROLE_ID: &str = "00000000-0000-0000-0000-000000000003";
const STUDENT_ROLE_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::test]
async fn test_student_is_forbidden_and_admin_passes() {
    let app = TestApp::new().await;
    app.register("stu", "student-pass", "student").await;
    let student = app.login("stu", "student-pass").await;
    let admin = app.admin_token().await;

    let denied = app.request("GET", "/cms/users", None, Some(&student)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.error_code(), "FORBIDDEN");

    let allowed = app.request("GET", "/cms/users", None, Some(&admin)).await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["users"]["total_items"], 2);

    // Admin also passes the any-role group.
    let me = app.request("GET", "/auth/user", None, Some(&admin)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["role_name"], "admin");
}

#[tokio::test]
async fn test_cms_requires_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/cms/roles", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_change_applies_to_issued_tokens() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let created = app
        .request(
            "POST",
            "/cms/user",
            Some(json!({
                "username": "deputy",
                "email": "deputy@quizhub.test",
                "password": "deputy-pass",
                "role_id": "00000000-0000-0000-0000-000000000001",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let deputy_id = created.body["user"]["id"].as_str().expect("user id").to_string();

    let deputy = app.login("deputy", "deputy-pass").await;
    let before = app.request("GET", "/cms/roles", None, Some(&deputy)).await;
    assert_eq!(before.status, StatusCode::OK);

    let downgraded = app
        .request(
            "PUT",
            &format!("/cms/user/{deputy_id}"),
            Some(json!({ "role_id": STUDENT_ROLE_ID })),
            Some(&admin),
        )
        .await;
    assert_eq!(downgraded.status, StatusCode::OK);
    assert_eq!(downgraded.body["user"]["role_name"], "student");

    // Same token, new role.
    let after = app.request("GET", "/cms/roles", None, Some(&deputy)).await;
    assert_eq!(after.status, StatusCode::FORBIDDEN);

    let deleted = app
        .request("DELETE", &format!("/cms/user/{deputy_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", "/auth/user", None, Some(&deputy)).await;
    assert_eq!(gone.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_management() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;
    let id = app.register("carol", "carol-pass", "student").await;

    let fetched = app
        .request("GET", &format!("/cms/user/{id}"), None, Some(&admin))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["user"]["username"], "carol");

    let bad_id = app.request("GET", "/cms/user/not-a-uuid", None, Some(&admin)).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);

    let missing = app
        .request(
            "GET",
            "/cms/user/6f1c1d9e-5b1a-4a43-9b55-8f2a3b0f7c11",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let duplicate = app
        .request(
            "POST",
            "/cms/user",
            Some(json!({
                "username": "carol",
                "email": "other@quizhub.test",
                "password": "carol-pass",
                "role_id": TEACHER_ROLE_ID,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let updated = app
        .request(
            "PUT",
            &format!("/cms/user/{id}"),
            Some(json!({ "password": "carol-new-pass" })),
            Some(&admin),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    app.login("carol", "carol-new-pass").await;

    let page = app
        .request("GET", "/cms/users?page=1&per_page=1", None, Some(&admin))
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["users"]["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(page.body["users"]["has_next"], true);

    let bad_page = app
        .request("GET", "/cms/users?page=abc", None, Some(&admin))
        .await;
    assert_eq!(bad_page.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_number_at_u64_max_is_an_empty_page() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let page = app
        .request(
            "GET",
            "/cms/users?page=18446744073709551615&per_page=100",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["users"]["items"].as_array().map(Vec::len), Some(0));
    assert_eq!(page.body["users"]["has_next"], false);
}

#[tokio::test]
async fn test_deleted_role_cannot_be_assigned() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let created = app
        .request("POST", "/cms/role", Some(json!({ "name": "reviewer" })), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let role_id = created.body["role"]["id"].as_str().unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/cms/role/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let rejected = app
        .request(
            "POST",
            "/cms/user",
            Some(json!({
                "username": "hank",
                "email": "hank@quizhub.test",
                "password": "hank-pass",
                "role_id": role_id,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected.error_code(), "VALIDATION_ERROR");

    let user_id = app.register("hank", "hank-pass", "student").await;
    let reassigned = app
        .request(
            "PUT",
            &format!("/cms/user/{user_id}"),
            Some(json!({ "role_id": role_id })),
            Some(&admin),
        )
        .await;
    assert_eq!(reassigned.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_role_management() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let roles = app.request("GET", "/cms/roles", None, Some(&admin)).await;
    assert_eq!(roles.status, StatusCode::OK);
    assert_eq!(roles.body["roles"].as_array().map(Vec::len), Some(3));

    let created = app
        .request("POST", "/cms/role", Some(json!({ "name": "Grader" })), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["role"]["name"], "grader");
    let role_id = created.body["role"]["id"].as_str().expect("role id").to_string();

    let duplicate = app
        .request("POST", "/cms/role", Some(json!({ "name": "grader" })), Some(&admin))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let builtin = app
        .request(
            "PUT",
            &format!("/cms/role/{TEACHER_ROLE_ID}"),
            Some(json!({ "name": "lecturer" })),
            Some(&admin),
        )
        .await;
    assert_eq!(builtin.status, StatusCode::CONFLICT);

    let renamed = app
        .request(
            "PUT",
            &format!("/cms/role/{role_id}"),
            Some(json!({ "name": "marker" })),
            Some(&admin),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["role"]["name"], "marker");

    let assigned = app
        .request(
            "POST",
            "/cms/user",
            Some(json!({
                "username": "marker1",
                "email": "marker1@quizhub.test",
                "password": "marker-pass",
                "role_id": role_id,
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(assigned.status, StatusCode::CREATED);
    let marker_id = assigned.body["user"]["id"].as_str().expect("user id").to_string();

    let in_use = app
        .request("DELETE", &format!("/cms/role/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(in_use.status, StatusCode::CONFLICT);

    app.request("DELETE", &format!("/cms/user/{marker_id}"), None, Some(&admin))
        .await;
    let deleted = app
        .request("DELETE", &format!("/cms/role/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/cms/role/{role_id}"), None, Some(&admin))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_management() {
    let app = TestApp::new().await;
    let admin = app.admin_token().await;

    let created = app
        .request("POST", "/cms/category", Some(json!({ "name": "Algebra" })), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.body["category"]["id"].as_str().expect("category id").to_string();

    let by_name = app
        .request("GET", "/cms/category/name/algebra", None, Some(&admin))
        .await;
    assert_eq!(by_name.status, StatusCode::OK);
    assert_eq!(by_name.body["category"]["id"], id.as_str());

    let empty = app
        .request("POST", "/cms/category", Some(json!({ "name": "" })), Some(&admin))
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let renamed = app
        .request(
            "PUT",
            &format!("/cms/category/{id}"),
            Some(json!({ "name": "Geometry" })),
            Some(&admin),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);

    let list = app.request("GET", "/cms/categories", None, Some(&admin)).await;
    assert_eq!(list.body["categories"][0]["name"], "Geometry");

    let deleted = app
        .request("DELETE", &format!("/cms/category/{id}"), None, Some(&admin))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let again = app
        .request("DELETE", &format!("/cms/category/{id}"), None, Some(&admin))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
