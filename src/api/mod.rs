//! JSON-over-HTTP surface for the chart workflow

pub mod error;
pub mod models;
pub mod services;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use state::AppState;

/// All routes with state and request tracing attached
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(services::health))
        .route("/metrics", get(services::metrics))
        .route("/charts", get(services::list_charts))
        .route("/charts/fetch", post(services::fetch_charts))
        .route("/geocode", post(services::geocode))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
