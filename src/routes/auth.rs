use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppJson;
use crate::{
    error::AppResult,
    middleware::AuthUser,
    service::AuthService,
    state::AppState,
    types::{AuthPayload, Envelope, LoginPayload, LoginRequest, RegisterRequest, User},
};

pub async fn list_users(
    State(state): State<AppState>,
    _caller: AuthUser,
) -> AppResult<Json<Envelope<Vec<User>>>> {
    let users = AuthService::new(&state.db, &state.config.auth).list_users().await?;
    Ok(Json(Envelope::new("Users found.", users)))
}

pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<Envelope<AuthPayload>>)> {
    let payload = AuthService::new(&state.db, &state.config.auth).register(&req).await?;
    Ok((StatusCode::CREATED, Json(Envelope::new("New user created.", payload))))
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> AppResult<Json<Envelope<LoginPayload>>> {
    let payload = AuthService::new(&state.db, &state.config.auth).login(&req).await?;
    Ok(Json(Envelope::new("Login successful.", payload)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<Envelope<User>>> {
    let user = AuthService::new(&state.db, &state.config.auth).delete_user(&id).await?;
    tracing::info!(deleted = %user.id, by = %caller.id, "User removed via API");
    Ok(Json(Envelope::new(format!("User '{}' deleted.", user.username), user)))
}
