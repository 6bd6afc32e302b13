//! API route definitions

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let index = ServeFile::new(&state.config.index_file);

    Router::new()
        // Static index
        .route_service("/", index)
        // Health check
        .route("/health", get(handlers::health_check))
        // Reports
        .route(
            "/reports",
            get(handlers::reports::list_reports).post(handlers::reports::create_report),
        )
        .route("/reports/:post_id", get(handlers::reports::get_report))
        // Layers
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
