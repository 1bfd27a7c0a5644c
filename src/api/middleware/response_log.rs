//! Per-request access logging keyed by client identity.

use async_trait::async_trait;
use axum::{
    body::Body,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{info, warn};

use super::pipeline::{Filter, RequestContext};
use crate::error::AppError;

/// Logs each request on entry and the first line of its response on exit.
///
/// # Example Logs
///
/// ```text
/// INFO 203.0.113.7 - Received req for /shorten
/// INFO 203.0.113.7 - Returned code 201: {"longurl":"...","shorturl":"..."}
/// INFO 203.0.113.7 - Returned code 200: <!DOCTYPE html> ... (truncated)
/// ```
///
/// The body is buffered to find its first line; the client still receives
/// it in full.
pub struct ResponseLogFilter;

#[async_trait]
impl Filter for ResponseLogFilter {
    fn name(&self) -> &'static str {
        "response_log"
    }

    async fn before(&self, ctx: &RequestContext) -> Result<(), AppError> {
        info!("{} - Received req for {}", ctx.identity(), ctx.path());
        Ok(())
    }

    async fn after(&self, ctx: &RequestContext, response: Response) -> Response {
        let (parts, body) = response.into_parts();

        let bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("{} - Failed to buffer response: {}", ctx.identity(), e);
                return AppError::internal(
                    "Response body could not be read",
                    json!({ "reason": e.to_string() }),
                )
                .into_response();
            }
        };

        let (first_line, truncated) = first_line(&String::from_utf8_lossy(&bytes));
        info!(
            identity = ctx.identity(),
            status = parts.status.as_u16(),
            truncated,
            "{} - Returned code {}: {}{}",
            ctx.identity(),
            parts.status.as_u16(),
            first_line,
            if truncated { " ... (truncated)" } else { "" }
        );

        Response::from_parts(parts, Body::from(bytes))
    }
}

/// Splits off the first line; `true` if anything non-blank follows it.
fn first_line(text: &str) -> (String, bool) {
    match text.split_once('\n') {
        Some((head, rest)) => (
            head.trim_end_matches('\r').to_string(),
            !rest.trim().is_empty(),
        ),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("single"), ("single".to_string(), false));
        assert_eq!(first_line("line\n"), ("line".to_string(), false));
        assert_eq!(first_line("a\r\nb\nc"), ("a".to_string(), true));
        assert_eq!(first_line(""), (String::new(), false));
    }

    #[tokio::test]
    async fn test_body_is_passed_through_untouched() {
        let body = "first\nsecond\nthird";
        let response = ResponseLogFilter
            .after(
                &RequestContext::default(),
                (StatusCode::CREATED, body).into_response(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], body.as_bytes());
    }
}
