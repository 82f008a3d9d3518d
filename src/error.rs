use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// The primary error type for the application.
///
/// Every layer returns this type; `IntoResponse` below is the single place where a
/// failure becomes an HTTP status and a `{error, message}` body.
#[derive(Debug, Error)]
pub enum AppError {
    /// A create or update would duplicate a record that must be unique.
    #[error("{0}")]
    Conflict(String),
    /// The requested record or route does not exist (or is not visible to the caller).
    #[error("{0}")]
    NotFound(String),
    /// Input failed validation, or credentials were rejected.
    #[error("{0}")]
    Invalid(String),
    /// Missing or bad API key or token.
    #[error("{0}")]
    Unauthorized(String),
    /// A server-side operation failed with a message that is safe to show.
    #[error("{0}")]
    Server(String),
    /// The request could not be parsed at all (malformed JSON, bad query string).
    #[error("{0}")]
    BadRequest(String),
    /// For errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
    /// For internal server errors that are not expected to be handled by the client.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Name reported in the `error` field of the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Conflict(_) => "ConflictError",
            AppError::NotFound(_) => "NotFoundError",
            AppError::Invalid(_) => "InvalidError",
            AppError::Unauthorized(_) => "UnauthorizedError",
            AppError::BadRequest(_) => "BadRequestError",
            AppError::Server(_) | AppError::Database(_) | AppError::Internal(_) => "ServerError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Invalid(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Server(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();

        let message = match &self {
            AppError::Database(_) | AppError::Internal(_) => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "{:?}", self);
                format!("An internal server error occurred (error id {})", error_id)
            }
            AppError::Server(msg) => {
                tracing::error!("Server error: {}", msg);
                msg.clone()
            }
            other => {
                tracing::debug!(status = status.as_u16(), "{}: {}", kind, other);
                other.to_string()
            }
        };

        (status, Json(json!({ "error": kind, "message": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                ErrorKind::UniqueViolation => {
                    return AppError::Conflict("A record with these values already exists.".to_string())
                }
                ErrorKind::ForeignKeyViolation => {
                    return AppError::Conflict(
                        "The record is referenced by other records or references a missing one."
                            .to_string(),
                    )
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(anyhow::Error::new(err).context("password hashing failed"))
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("Token rejected: {}", err);
        AppError::Unauthorized("Invalid token.".to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// An extension trait for `Option` that provides a convenient way to convert
/// an `Option` to a `Result` with a `NotFound` error.
pub trait OptionExt<T> {
    /// Converts `None` into `AppError::NotFound` carrying `message` verbatim.
    fn ok_or_not_found(self, message: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, message: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}
