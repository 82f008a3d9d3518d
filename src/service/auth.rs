use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult, OptionExt},
    repository::UserRepository,
    types::{AuthPayload, LoginPayload, LoginRequest, LoginUser, RegisterRequest, User},
    validation,
};

/// Same message for unknown identifiers and wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// JWT payload issued at registration and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated user.
    pub id: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct AuthService<'a> {
    db: &'a SqlitePool,
    config: &'a AuthConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a SqlitePool, config: &'a AuthConfig) -> Self {
        Self { db, config }
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = UserRepository::new(self.db).find_all().await?;
        if users.is_empty() {
            return Err(AppError::NotFound("No users found.".to_string()));
        }
        Ok(users)
    }

    /// Validates, rejects duplicate usernames then emails, stores a hashed password and
    /// returns the new user with a fresh token.
    pub async fn register(&self, req: &RegisterRequest) -> AppResult<AuthPayload> {
        let input = validation::validate_registration(req)?;
        let repo = UserRepository::new(self.db);

        if repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::Conflict("Username already registered.".to_string()));
        }
        if repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered.".to_string()));
        }

        let hashed = self.hash_password(input.password).await?;
        let user = repo.create(&input.name, &input.email, &input.username, &hashed).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        let token = self.issue_token(&user.id)?;
        Ok(AuthPayload { token, user })
    }

    pub async fn login(&self, req: &LoginRequest) -> AppResult<LoginPayload> {
        let identifier = [&req.identifier, &req.email, &req.username]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty());
        let password = req.password.as_deref().filter(|p| !p.is_empty());

        let (Some(identifier), Some(password)) = (identifier, password) else {
            return Err(AppError::Invalid(INVALID_CREDENTIALS.to_string()));
        };

        let Some(user) = UserRepository::new(self.db).find_by_identifier(identifier).await? else {
            tracing::debug!("Login failed: unknown identifier");
            return Err(AppError::Invalid(INVALID_CREDENTIALS.to_string()));
        };

        if !self.verify_password(password.to_string(), user.password.clone()).await? {
            tracing::debug!(user_id = %user.id, "Login failed: password mismatch");
            return Err(AppError::Invalid(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.issue_token(&user.id)?;
        Ok(LoginPayload {
            token,
            user: LoginUser { id: user.id, username: user.username, email: user.email },
        })
    }

    /// Deletes the user and returns the removed record.
    pub async fn delete_user(&self, id: &str) -> AppResult<User> {
        let repo = UserRepository::new(self.db);
        let user = repo.find_by_id(id).await?.ok_or_not_found("User not found.")?;
        repo.delete(id).await?;
        tracing::info!(user_id = %user.id, "User deleted");
        Ok(user)
    }

    pub fn issue_token(&self, user_id: &str) -> AppResult<String> {
        issue_token(self.config, user_id)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token(self.config, token)
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.config.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: String, hash: String) -> AppResult<bool> {
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(e.into()))??;
        Ok(matches)
    }
}

/// Signs an HS256 token for `user_id`, valid for the configured number of hours.
pub fn issue_token(config: &AuthConfig, user_id: &str) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        id: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(config.token_ttl_hours)).timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(config.jwt_secret.as_bytes()))
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("failed to sign token")))
}

/// Checks signature and expiry. Any failure maps to `Unauthorized("Invalid token.")`.
pub fn verify_token(config: &AuthConfig, token: &str) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
