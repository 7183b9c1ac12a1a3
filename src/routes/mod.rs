//! Route modules for the document previewer server

pub mod health;
pub mod samples;
pub mod viewer;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let max_upload_bytes = state.config().viewer.max_upload_bytes;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", health::router())
        .route("/api/v1/health", get(health::health_check))
        .merge(samples::router())
        .nest("/api/v1/viewer", viewer::api_router(max_upload_bytes))
        .merge(viewer::page_router(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
