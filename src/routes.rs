//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Database reachability probe (public)
//! - `/api/*`      - REST API; caller identity comes from the upstream
//!   gateway via the `X-User-Id` header
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Path normalization** - trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::api;
use crate::api::handlers::health_handler;
use crate::state::AppState;

/// The application router without outer path normalization.
///
/// Integration tests build their server from this; [`app_router`] wraps
/// it for production serving.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Constructs the full application router with all middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app(state))
}
