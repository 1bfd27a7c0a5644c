//! Request filters and the pipeline that composes them.
//!
//! Each endpoint gets its own [`pipeline::Pipeline`]; see
//! [`crate::api::routes`] for the compositions.

pub mod auth;
pub mod cors;
pub mod pipeline;
pub mod rate_limit;
pub mod require_params;
pub mod response_log;
pub mod tracing;

pub use auth::SharedSecretFilter;
pub use cors::CorsFilter;
pub use pipeline::{Filter, Pipeline, PipelineBuilder, RequestContext};
pub use rate_limit::RateLimitFilter;
pub use require_params::RequireParams;
pub use response_log::ResponseLogFilter;
