//! Host harness HTTP surface.

pub mod admin;
pub mod events;
pub mod health;

use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::logging::request_logger;
use crate::AppState;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(events::router(state.clone()))
        .nest("/admin", admin::router(state))
        .layer(middleware::from_fn(request_logger))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
