pub mod config;
pub mod domain;
pub mod global;
pub mod monitoring;
pub mod shutdown;
pub mod state;
pub mod utils;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the HTTP router: control page, JSON state and health check.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(domain::station::index).post(domain::station::submit),
        )
        .route("/api/state", get(domain::station::get_state))
        .route("/health", get(domain::health::health_check))
        .layer(middleware::from_fn(
            global::middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
