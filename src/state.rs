use std::sync::Arc;

use crate::config::AppConfig;

/// The shared application state.
///
/// Cloned into every handler and middleware through Axum's state extraction. Both
/// fields are cheap to clone: the pool shares its connections and the config sits
/// behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    ///
    /// Carries the API key, JWT secret, token lifetime and bcrypt cost used by the
    /// auth middleware and services.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }
}
