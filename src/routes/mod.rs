//! HTTP route handlers for the Gradebook API.
//!
//! Each sub-module handles one resource and only translates between HTTP and the
//! services:
//!
//! - `auth`: registration, login, user listing and deletion
//! - `grades`: grades of a subject
//! - `health`: liveness, readiness and version probes
//! - `semesters`: semesters of the authenticated user
//! - `subjects`: subjects of a semester

pub mod auth;
pub mod grades;
pub mod health;
pub mod semesters;
pub mod subjects;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::Uri,
};

use crate::error::AppError;

/// `axum::Json` whose rejection is rendered like every other error.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejection is rendered like every other error.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// Fallback for unmatched routes.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route not found: {}", uri.path()))
}
