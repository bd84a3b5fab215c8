//! Route definitions

use axum::{
    Router,
    routing::{MethodRouter, get},
};
use tower_http::{compression::CompressionLayer, services::ServeDir};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
///
/// API paths answer with and without a trailing slash. When the frontend is
/// enabled, anything else falls through to the static files.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    let router = [
        "/api/sights/{lat}/{lon}",
        "/api/sights/{lat}/{lon}/{date}",
    ]
    .into_iter()
    .fold(router, |router, path| {
        route_with_slash(router, path, get(handlers::sights::sights_near))
    });

    let router = [
        "/api/aboard/{feed_id}/{trip_id}",
        "/api/aboard/{feed_id}/{trip_id}/{date}",
        "/api/aboard/{feed_id}/{trip_id}/{date}/{late_seconds}",
    ]
    .into_iter()
    .fold(router, |router, path| {
        route_with_slash(router, path, get(handlers::aboard::sights_aboard))
    });

    let router = [
        "/api/data/{data_type}",
        "/api/data/{data_type}/{first_key}",
        "/api/data/{data_type}/{first_key}/{second_key}",
    ]
    .into_iter()
    .fold(router, |router, path| {
        route_with_slash(router, path, get(handlers::data::lookup))
    });

    let router = if state.config.serve_frontend {
        router.fallback_service(ServeDir::new(&state.config.frontend_root))
    } else {
        router
    };

    router.layer(CompressionLayer::new()).with_state(state)
}

fn route_with_slash(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}
