//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET|POST /shorten`       - Generated short link (rate limited)
//! - `POST     /customshorten` - Custom alias (shared secret)
//! - `GET      /{code}`        - Short link redirect
//! - `GET      /`              - Landing page
//! - `GET      /health`        - Health check: store reachability
//!
//! # Middleware
//!
//! - **Filter pipelines** - Per-route, see [`crate::api::routes`]
//! - **Tracing** - Structured request/response spans
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and layers, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::link_routes(&state))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service served by [`crate::server`].
///
/// Trailing slashes are trimmed before routing, so `/shorten/` reaches
/// `/shorten`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
