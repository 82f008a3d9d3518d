use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{api_key::require_api_key, auth::require_auth, security_headers::security_headers_middleware},
    routes,
    state::AppState,
};

/// Assembles the full application router.
///
/// Health probes are public. Registration and login need the API key, every other
/// route needs the API key and a valid token. Unmatched paths fall through to a
/// JSON 404.
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(routes::health::health))
        .route("/readyz", get(routes::health::readyz))
        .route("/version", get(routes::health::version));

    let open_auth = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route_layer(from_fn_with_state(state.clone(), require_api_key));

    // route_layer: the last one added runs first, so the key is checked before the token
    let protected = Router::new()
        .route("/auth", get(routes::auth::list_users))
        .route("/auth/delete/{id}", delete(routes::auth::delete_user))
        .route(
            "/semesters",
            get(routes::semesters::list_semesters).post(routes::semesters::create_semester),
        )
        .route(
            "/semesters/{id}",
            get(routes::semesters::get_semester)
                .put(routes::semesters::update_semester)
                .delete(routes::semesters::delete_semester),
        )
        .route(
            "/subjects",
            get(routes::subjects::list_subjects).post(routes::subjects::create_subject),
        )
        .route(
            "/subjects/{id}",
            get(routes::subjects::get_subject)
                .put(routes::subjects::update_subject)
                .delete(routes::subjects::delete_subject),
        )
        .route("/grades", get(routes::grades::list_grades).post(routes::grades::create_grade))
        .route(
            "/grades/{id}",
            get(routes::grades::list_grades_for_subject)
                .put(routes::grades::update_grade)
                .delete(routes::grades::delete_grade),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .route_layer(from_fn_with_state(state.clone(), require_api_key));

    let cfg_arc = state.config.clone();

    Router::new()
        .merge(public)
        .merge(open_auth)
        .merge(protected)
        .fallback(routes::route_not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(cfg_arc, security_headers_middleware))
}
