//! Permissive CORS headers for browser clients.

use async_trait::async_trait;
use axum::{
    http::{HeaderValue, header},
    response::Response,
};

use super::pipeline::{Filter, RequestContext};

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// Allows any origin to call the endpoint.
///
/// Never rejects; headers are added to every response that reaches it,
/// including rejections from inner filters.
pub struct CorsFilter;

#[async_trait]
impl Filter for CorsFilter {
    fn name(&self) -> &'static str {
        "cors"
    }

    async fn after(&self, _ctx: &RequestContext, mut response: Response) -> Response {
        let headers = response.headers_mut();
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
        response
    }
}
