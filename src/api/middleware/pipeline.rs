//! Declarative request filter pipeline.
//!
//! A [`Pipeline`] is an ordered list of [`Filter`]s wrapped around one handler:
//!
//! ```text
//! before(outer) -> before(inner) -> handler -> after(inner) -> after(outer)
//! ```
//!
//! The first `before` that fails short-circuits: its error becomes the
//! response, and only the filters that already passed get their `after`.

use std::collections::HashMap;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::utils::client_identity::client_identity;

/// Largest form body the pipeline buffers.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Per-request data captured once before any filter runs.
///
/// Parameters merge the query string and an urlencoded form body; on
/// conflict the body value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    identity: String,
    path: String,
    params: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(
        identity: impl Into<String>,
        path: impl Into<String>,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            path: path.into(),
            params,
        }
    }

    /// Client identity used for logging and rate limiting.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a parameter, treating an empty value as absent.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Returns a parameter or [`AppError::MissingParameter`].
    pub fn require(&self, name: &str) -> Result<&str, AppError> {
        self.param(name)
            .ok_or_else(|| AppError::missing_parameter(name))
    }
}

/// Handlers read the context the pipeline stored in the request extensions.
///
/// Outside a pipeline the context is rebuilt from the query string alone, and
/// forwarded headers are not trusted.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<RequestContext>() {
            return Ok(ctx.clone());
        }

        let identity = client_identity(&parts.headers, peer_addr(parts), false);
        Ok(RequestContext::new(
            identity,
            parts.uri.path(),
            parse_params(parts.uri.query().unwrap_or_default().as_bytes()),
        ))
    }
}

/// One step of a [`Pipeline`].
///
/// Both phases default to pass-through.
#[async_trait]
pub trait Filter: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Runs before the handler. An error stops the pipeline and is rendered
    /// as the response.
    async fn before(&self, _ctx: &RequestContext) -> Result<(), AppError> {
        Ok(())
    }

    /// Runs after the handler (or after a rejection by an inner filter).
    async fn after(&self, _ctx: &RequestContext, response: Response) -> Response {
        response
    }
}

/// An ordered, immutable chain of filters.
pub struct Pipeline {
    filters: Vec<Arc<dyn Filter>>,
    trust_forwarded: bool,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Filter names, outermost first.
    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Runs the filters around `handler`.
    ///
    /// `handler` is only polled if every `before` passed.
    pub async fn process<F>(&self, ctx: &RequestContext, handler: F) -> Response
    where
        F: Future<Output = Response>,
    {
        let mut passed = 0;
        let mut rejection = None;

        for filter in &self.filters {
            if let Err(e) = filter.before(ctx).await {
                debug!(
                    "{} - {} rejected {}: {}",
                    ctx.identity(),
                    filter.name(),
                    ctx.path(),
                    e
                );
                rejection = Some(e.into_response());
                break;
            }
            passed += 1;
        }

        let mut response = match rejection {
            Some(response) => response,
            None => handler.await,
        };

        for filter in self.filters[..passed].iter().rev() {
            response = filter.after(ctx, response).await;
        }

        response
    }
}

/// Builds a [`Pipeline`]; filters run in the order they are added.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::builder()
///     .filter(CorsFilter)
///     .filter(ResponseLogFilter)
///     .filter(RequireParams::new(["longurl"]))
///     .build();
/// ```
pub struct PipelineBuilder {
    filters: Vec<Arc<dyn Filter>>,
    trust_forwarded: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            trust_forwarded: true,
        }
    }
}

impl PipelineBuilder {
    pub fn filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Whether `X-Forwarded-For` / `X-Real-IP` decide the client identity.
    pub fn trust_forwarded(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            filters: self.filters,
            trust_forwarded: self.trust_forwarded,
        }
    }
}

/// Middleware entry point running a [`Pipeline`] around the matched route.
///
/// Captures the [`RequestContext`] (buffering an urlencoded body and
/// restoring it for the handler), then delegates to [`Pipeline::process`].
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(Arc::new(pipeline), pipeline::run));
/// ```
pub async fn run(State(pipeline): State<Arc<Pipeline>>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let bytes = match axum::body::to_bytes(body, MAX_FORM_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::bad_request(
                "Request body could not be read",
                json!({ "reason": e.to_string() }),
            )
            .into_response();
        }
    };

    let identity = client_identity(&parts.headers, peer_addr(&parts), pipeline.trust_forwarded);

    let mut params = parse_params(parts.uri.query().unwrap_or_default().as_bytes());
    if is_form(&parts.headers) {
        params.extend(parse_params(&bytes));
    }

    let ctx = RequestContext::new(identity, parts.uri.path(), params);
    parts.extensions.insert(ctx.clone());

    let req = Request::from_parts(parts, Body::from(bytes));
    pipeline.process(&ctx, next.run(req)).await
}

fn peer_addr(parts: &Parts) -> Option<SocketAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

/// Parses urlencoded pairs; a repeated name keeps its first value.
fn parse_params(input: &[u8]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (name, value) in url::form_urlencoded::parse(input).into_owned() {
        params.entry(name).or_insert(value);
    }
    params
}
