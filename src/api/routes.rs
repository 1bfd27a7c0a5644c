//! API route configuration.
//!
//! Every public endpoint runs behind its own filter pipeline, applied as a
//! route layer so unmatched paths skip it.
//!
//! | Route            | Pipeline (outer to inner)                          |
//! |------------------|----------------------------------------------------|
//! | `/shorten`       | cors, response_log, require_params, rate_limit     |
//! | `/customshorten` | cors, response_log, require_params, shared_secret  |
//! | `/{code}`        | response_log                                       |
//! | `/`              | response_log                                       |

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    custom_shorten_handler, landing_handler, redirect_handler, shorten_handler,
};
use crate::api::middleware::{
    CorsFilter, Pipeline, RateLimitFilter, RequireParams, ResponseLogFilter, SharedSecretFilter,
    pipeline,
};
use crate::state::AppState;

/// `/shorten` filters: CORS, logging, `longurl` check, rate limit.
pub fn shorten_pipeline(state: &AppState) -> Pipeline {
    Pipeline::builder()
        .trust_forwarded(state.behind_proxy)
        .filter(CorsFilter)
        .filter(ResponseLogFilter)
        .filter(RequireParams::new(["longurl"]))
        .filter(RateLimitFilter::new(state.rate_limiter.clone()))
        .build()
}

/// `/customshorten` filters: CORS, logging, `longurl` + `customurl` check,
/// shared-secret auth.
pub fn custom_shorten_pipeline(state: &AppState) -> Pipeline {
    Pipeline::builder()
        .trust_forwarded(state.behind_proxy)
        .filter(CorsFilter)
        .filter(ResponseLogFilter)
        .filter(RequireParams::new(["longurl", "customurl"]))
        .filter(SharedSecretFilter::new(state.auth_service.clone()))
        .build()
}

/// Redirect and landing page filters: logging only.
pub fn logged_pipeline(state: &AppState) -> Pipeline {
    Pipeline::builder()
        .trust_forwarded(state.behind_proxy)
        .filter(ResponseLogFilter)
        .build()
}

/// All link routes, each wrapped in its pipeline.
///
/// # Endpoints
///
/// - `GET|POST /shorten`       - Generated short link
/// - `POST     /customshorten` - Custom alias
/// - `GET      /{code}`        - Redirect
/// - `GET      /`              - Landing page
pub fn link_routes(state: &AppState) -> Router<AppState> {
    let shorten = Router::new()
        .route("/shorten", get(shorten_handler).post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(shorten_pipeline(state)),
            pipeline::run,
        ));

    let custom = Router::new()
        .route("/customshorten", post(custom_shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(custom_shorten_pipeline(state)),
            pipeline::run,
        ));

    let public = Router::new()
        .route("/", get(landing_handler))
        .route("/{code}", get(redirect_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::new(logged_pipeline(state)),
            pipeline::run,
        ));

    Router::new().merge(shorten).merge(custom).merge(public)
}
