//! Shared fixtures: every test gets its own SQLite file in a temporary directory.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{
    config::{AppConfig, AuthConfig, DatabaseConfig, ServerConfig},
    db,
    state::AppState,
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_SECRET: &str = "test-jwt-secret";

/// Keeps the temporary directory alive for as long as the pool is used.
pub struct TestDb {
    pub pool: SqlitePool,
    _dir: TempDir,
}

pub fn test_config(db_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 8080 },
        database: DatabaseConfig { url: db_url.to_string(), max_connections: 1 },
        auth: AuthConfig {
            api_key: Some(TEST_API_KEY.to_string()),
            jwt_secret: TEST_SECRET.to_string(),
            token_ttl_hours: 24,
            // lowest cost bcrypt accepts, keeps the suite fast
            bcrypt_cost: 4,
        },
        security: None,
    }
}

pub async fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_url = format!("sqlite://{}", dir.path().join("test.db").display());
    let pool = db::connect(&DatabaseConfig { url: db_url, max_connections: 1 }).await.unwrap();
    db::init_db(&pool).await.unwrap();
    TestDb { pool, _dir: dir }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _db: TestDb,
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

pub async fn setup_test_app_with(tweak: impl FnOnce(&mut AppConfig)) -> TestApp {
    let test_db = setup_test_db().await;
    let mut config = test_config("sqlite::memory:");
    tweak(&mut config);
    let state = AppState::new(test_db.pool.clone(), config);
    let router = crate::app::build_router(state.clone());
    TestApp { router, state, _db: test_db }
}

impl TestApp {
    /// Sends one request with the API key and, if given, a bearer token.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri).header("apikey", TEST_API_KEY);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.raw(request).await
    }

    pub async fn raw(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, value)
    }

    /// Registers `username` and returns `(user id, token)`.
    pub async fn register(&self, username: &str) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/auth/register",
                None,
                Some(json!({
                    "name": "Test User",
                    "email": format!("{}@example.com", username),
                    "username": username,
                    "password": "secret123",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        let id = body["data"]["user"]["id"].as_str().unwrap().to_string();
        let token = body["data"]["token"].as_str().unwrap().to_string();
        (id, token)
    }

    pub async fn create_semester(&self, token: &str, name: &str) -> String {
        let (status, body) =
            self.send(Method::POST, "/semesters", Some(token), Some(json!({ "semester": name }))).await;
        assert_eq!(status, StatusCode::CREATED, "create semester failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn create_subject(&self, token: &str, semester_id: &str, name: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/subjects",
                Some(token),
                Some(json!({ "name": name, "semesterId": semester_id })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create subject failed: {}", body);
        body["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Inserts a user directly through the repository, with a throwaway hash.
pub async fn insert_user(pool: &SqlitePool, username: &str) -> crate::types::User {
    crate::repository::UserRepository::new(pool)
        .create("Test User", &format!("{}@example.com", username), username, "not-a-real-hash")
        .await
        .unwrap()
}
