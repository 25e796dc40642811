//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use quizhub_api::AppState;
use quizhub_core::config::{
    AppConfig, AuthConfig, BootstrapAdminConfig, DatabaseConfig, LoggingConfig, ServerConfig,
};
use quizhub_database::{MemoryStore, Stores};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Application state, for reaching services directly
    pub state: AppState,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

fn test_config() -> AppConfig {
    let mut auth = AuthConfig::with_secret("integration-test-secret");
    auth.argon2_memory_kib = 8;
    auth.argon2_iterations = 1;
    auth.bootstrap_admin = Some(BootstrapAdminConfig {
        username: ADMIN_USERNAME.to_string(),
        email: "admin@quizhub.test".to_string(),
        password: ADMIN_PASSWORD.to_string(),
    });

    AppConfig {
        server: ServerConfig::default(),
        database: DatabaseConfig::memory(),
        auth,
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application with a seeded admin account
    pub async fn new() -> Self {
        let config = test_config();
        let bootstrap = config.auth.bootstrap_admin.clone().expect("bootstrap admin configured");

        let state = AppState::new(config, Stores::memory(MemoryStore::new()))
            .expect("Failed to build app state");
        state
            .admin_user_service
            .ensure_bootstrap_admin(&bootstrap)
            .await
            .expect("Failed to seed admin");

        let router = quizhub_api::build_app(state.clone());
        Self { router, state }
    }

    /// Register an account through the public endpoint and return its ID
    pub async fn register(&self, username: &str, password: &str, role: &str) -> String {
        let response = self
            .request(
                "POST",
                "/auth/register",
                Some(serde_json::json!({
                    "username": username,
                    "email": format!("{username}@quizhub.test"),
                    "password": password,
                    "role_name": role,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Register failed: {:?}",
            response.body
        );

        response.body["user"]["id"]
            .as_str()
            .expect("No user id in register response")
            .to_string()
    }

    /// Login and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let response = self.request("POST", "/auth/login", Some(body), None).await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Login as the seeded admin
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}
