// Library exports for testing and external use

pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use std::{sync::Arc, time::Duration};

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<utils::config::AppConfig>,
    pub store: Arc<services::file_storage::UploadStore>,
    pub shutdown: services::lifecycle::ShutdownHandle,
}

/// Build the application router: the upload page, the one-shot upload
/// endpoint, and the middleware stack.
pub fn app(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_seconds);

    Router::new()
        .route("/", get(handlers::index::serve_index))
        .route("/upload", post(handlers::upload::receive_files))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}
