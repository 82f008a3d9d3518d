#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::json;

    use crate::service::auth::Claims;
    use crate::tests::support::{setup_test_app, setup_test_app_with, TEST_API_KEY, TEST_SECRET};

    fn registration(username: &str, email: &str) -> serde_json::Value {
        json!({
            "name": "Test User",
            "email": email,
            "username": username,
            "password": "secret123",
        })
    }

    #[tokio::test]
    async fn test_register_returns_user_without_password() {
        let app = setup_test_app().await;

        let (status, body) = app
            .send(Method::POST, "/auth/register", None, Some(registration("alice", "alice@example.com")))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "New user created.");
        assert!(body["data"]["token"].is_string());
        assert_eq!(body["data"]["user"]["username"], "alice");
        assert!(body["data"]["user"]["createdAt"].is_string());
        assert!(body["data"]["user"].get("password").is_none());
        assert!(!body.to_string().contains("$2"));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = setup_test_app().await;
        app.register("alice").await;

        let (status, body) = app
            .send(Method::POST, "/auth/register", None, Some(registration("alice", "other@example.com")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "ConflictError");
        assert_eq!(body["message"], "Username already registered.");

        let (status, body) = app
            .send(Method::POST, "/auth/register", None, Some(registration("alice2", "alice@example.com")))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "Email already registered.");

        let users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&app.state.db).await.unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn test_register_validation_error() {
        let app = setup_test_app().await;

        let (status, body) = app
            .send(Method::POST, "/auth/register", None, Some(registration("alice", "alice@example.org")))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidError");
        assert!(body["message"].as_str().unwrap().starts_with("\"email\""));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = setup_test_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/register")
            .header("apikey", TEST_API_KEY)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = app.raw(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "BadRequestError");
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = setup_test_app().await;
        let (user_id, _) = app.register("alice").await;

        let (status, body) = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "email": "alice@example.com", "password": "secret123" })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful.");
        assert_eq!(body["data"]["user"], json!({
            "id": user_id,
            "username": "alice",
            "email": "alice@example.com",
        }));
        assert!(body["data"]["token"].is_string());
    }

    #[tokio::test]
    async fn test_login_failures_look_the_same() {
        let app = setup_test_app().await;
        app.register("alice").await;

        let wrong_password = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "identifier": "alice", "password": "wrong-pass" })),
            )
            .await;
        let unknown_user = app
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "identifier": "mallory", "password": "wrong-pass" })),
            )
            .await;

        assert_eq!(wrong_password.0, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.1["message"], "Invalid username or password.");
    }

    #[tokio::test]
    async fn test_api_key_required() {
        let app = setup_test_app().await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"identifier":"alice","password":"secret123"}"#))
            .unwrap();
        let (status, body) = app.raw(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UnauthorizedError");
        assert_eq!(body["message"], "Invalid or missing API key");

        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/login")
            .header("apikey", "wrong-key")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"identifier":"alice","password":"secret123"}"#))
            .unwrap();
        let (status, _) = app.raw(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_api_key_in_query() {
        let app = setup_test_app().await;
        let (_, token) = app.register("alice").await;

        let request = Request::builder()
            .uri(format!("/auth?apiKey={}", TEST_API_KEY))
            .header(header::AUTHORIZATION, token)
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.raw(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_api_key_check_disabled_without_key() {
        let app = setup_test_app_with(|cfg| cfg.auth.api_key = None).await;

        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(registration("alice", "alice@example.com").to_string()))
            .unwrap();
        let (status, _) = app.raw(request).await;

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_protected_routes_need_a_token() {
        let app = setup_test_app().await;

        let (status, body) = app.send(Method::GET, "/auth", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "No token provided.");

        let (status, body) = app.send(Method::GET, "/semesters", Some("not.a.token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token.");
    }

    #[tokio::test]
    async fn test_list_users_hides_passwords() {
        let app = setup_test_app().await;
        let (_, token) = app.register("alice").await;
        app.register("bob").await;

        let (status, body) = app.send(Method::GET, "/auth", Some(&token), None).await;

        assert_eq!(status, StatusCode::OK);
        let users = body["data"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let app = setup_test_app().await;
        let (_, token) = app.register("alice").await;
        let (bob_id, _) = app.register("bob").await;

        let (status, body) =
            app.send(Method::DELETE, &format!("/auth/delete/{}", bob_id), Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User 'bob' deleted.");
        assert!(body["data"].get("password").is_none());

        let (status, body) =
            app.send(Method::DELETE, &format!("/auth/delete/{}", bob_id), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found.");
    }

    #[tokio::test]
    async fn test_unknown_registration_keys_are_invalid() {
        let app = setup_test_app().await;
        let mut body = registration("alice", "alice@example.com");
        body["role"] = json!("admin");

        let (status, body) = app.send(Method::POST, "/auth/register", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "InvalidError");
        assert_eq!(body["message"], "\"role\" is not allowed");
        let users: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users").fetch_one(&app.state.db).await.unwrap();
        assert_eq!(users, 0);
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let app = setup_test_app().await;
        let (user_id, _) = app.register("alice").await;
        let now = chrono::Utc::now().timestamp();
        let claims = Claims { id: user_id, iat: now - 7200, exp: now - 3600 };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        let (status, body) = app.send(Method::GET, "/semesters", Some(&token), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "UnauthorizedError");
        assert_eq!(body["message"], "Invalid token.");
    }

    #[tokio::test]
    async fn test_token_of_deleted_user_is_rejected() {
        let app = setup_test_app().await;
        let (_, alice) = app.register("alice").await;
        let (carol_id, carol) = app.register("carol").await;

        let (status, _) =
            app.send(Method::DELETE, &format!("/auth/delete/{}", carol_id), Some(&alice), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .send(Method::POST, "/semesters", Some(&carol), Some(json!({ "semester": "WS 2024" })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token.");
        let semesters: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM semesters")
            .fetch_one(&app.state.db)
            .await
            .unwrap();
        assert_eq!(semesters, 0);
    }

    #[tokio::test]
    async fn test_bearer_scheme_is_case_insensitive() {
        let app = setup_test_app().await;
        let (_, token) = app.register("alice").await;

        for scheme in ["bearer", "BEARER", "Bearer"] {
            let request = Request::builder()
                .uri("/auth")
                .header("apikey", TEST_API_KEY)
                .header(header::AUTHORIZATION, format!("{} {}", scheme, token))
                .body(Body::empty())
                .unwrap();
            let (status, body) = app.raw(request).await;
            assert_eq!(status, StatusCode::OK, "scheme {}: {}", scheme, body);
        }
    }
}
