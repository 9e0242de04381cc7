//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Datasets
        .route(
            "/datasets",
            get(handlers::list_datasets).post(handlers::create_dataset),
        )
        .route("/datasets/{dataset_id}", get(handlers::get_dataset))
        // Views
        .route("/datasets/{dataset_id}/timeline", post(handlers::get_timeline))
        .route("/datasets/{dataset_id}/map", post(handlers::get_map))
        .route("/datasets/{dataset_id}/search", get(handlers::search_dataset))
        // Stateless kernels
        .route("/layout/pack-rows", post(handlers::pack_rows_handler))
        .route("/layout/heat", post(handlers::heat_handler))
        .route("/view-state/reduce", post(handlers::reduce_view_state));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Content exports can be large.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
