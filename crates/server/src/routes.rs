//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Largest accepted request body; bounds reference image uploads.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Health check (unauthenticated, for probes)
        .route("/api/health", get(handlers::health_check))
        // Capability status and provisioning
        .route("/api/status", get(handlers::get_status))
        .route(
            "/api/dependencies/install",
            post(handlers::install_dependencies),
        )
        // Characters
        .route(
            "/api/characters",
            get(handlers::list_characters).post(handlers::create_character),
        )
        .route(
            "/api/characters/{id}",
            put(handlers::update_character).delete(handlers::delete_character),
        )
        // Scenes
        .route(
            "/api/scenes",
            get(handlers::list_scenes).post(handlers::create_scene),
        );

    // Generated artifacts are served straight off the data directory; URLs
    // in API responses point here.
    let artifact_routes = Router::new()
        .nest_service(
            "/uploads/characters",
            ServeDir::new(state.config.data.characters_dir()),
        )
        .nest_service(
            "/uploads/scenes",
            ServeDir::new(state.config.data.scenes_dir()),
        );

    Router::new()
        .merge(api_routes)
        .merge(artifact_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
