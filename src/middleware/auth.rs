use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    repository::UserRepository,
    service::auth::verify_token,
    state::AppState,
};

/// The caller identified by a verified token, placed in request extensions by
/// [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
}

/// Middleware that checks the token in the `Authorization` header.
///
/// Accepts either the raw token or `Bearer <token>`. The token's user must still
/// exist. On success the user id is stored as an [`AuthUser`] extension for the
/// handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(strip_bearer)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Unauthorized("No token provided.".to_string()))?;

    let claims = verify_token(&state.config.auth, token)?;

    // A signed token can outlive its user
    if UserRepository::new(&state.db).find_by_id(&claims.id).await?.is_none() {
        tracing::debug!(user_id = %claims.id, "Token rejected: user no longer exists");
        return Err(AppError::Unauthorized("Invalid token.".to_string()));
    }

    req.extensions_mut().insert(AuthUser { id: claims.id });

    Ok(next.run(req).await)
}

/// Removes a leading `Bearer ` scheme, in any letter case.
pub(crate) fn strip_bearer(value: &str) -> &str {
    let value = value.trim();
    match value.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => value[7..].trim(),
        _ => value,
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("No token provided.".to_string()))
    }
}
