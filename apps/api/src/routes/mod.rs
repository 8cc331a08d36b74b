pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::layout::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Layout API
        .route("/api/v1/presets", get(handlers::handle_presets))
        .route("/api/v1/layout", post(handlers::handle_compute_layout))
        .with_state(state)
}
