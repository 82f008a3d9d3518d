use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

pub const API_KEY_HEADER: &str = "apikey";

/// Rejects requests whose API key does not match the configured one.
///
/// The key is read from the `apikey` header, falling back to the `apiKey` or
/// `apikey` query parameter. When no key is configured the middleware is a no-op.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> AppResult<Response> {
    let Some(expected) = state.config.auth.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| {
            let Query(params) = Query::<HashMap<String, String>>::try_from_uri(req.uri()).ok()?;
            params.get("apiKey").or_else(|| params.get("apikey")).cloned()
        });

    match provided {
        Some(key) if constant_time_eq(key.as_bytes(), expected.as_bytes()) => Ok(next.run(req).await),
        _ => {
            tracing::debug!(path = %req.uri().path(), "Rejected request with invalid or missing API key");
            Err(AppError::Unauthorized("Invalid or missing API key".to_string()))
        }
    }
}

/// Compares without short-circuiting on the first differing byte.
pub(crate) fn constant_time_eq(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    let mut diff = 0u8;
    for (a, b) in provided.iter().zip(expected) {
        diff |= a ^ b;
    }
    diff == 0
}
