use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{handlers, middleware::metrics_middleware, places};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().server.static_dir.clone();

    let mut router = Router::new()
        // Health, config and metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        // Place lookup
        .route("/search_location", post(places::search_location))
        .route("/fetching_data", post(places::fetching_data))
        .route("/restaurant_data", get(places::restaurant_data))
        .route("/hotel_data", get(places::hotel_data))
        .route("/get_recommendations", post(places::get_recommendations));

    // Serve the map front-end with index fallback
    if let Some(dir) = static_dir {
        let index_path = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)));
    }

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
