//! Rate limiting filter backed by [`RateLimiter`].

use std::sync::Arc;

use async_trait::async_trait;

use super::pipeline::{Filter, RequestContext};
use crate::application::services::{RateDecision, RateLimiter};
use crate::error::AppError;

/// Applies the per-identity request limit.
///
/// Requests exceeding the limit receive `429 Too Many Requests` with a
/// `Retry-After` header.
///
/// # Key Extraction
///
/// Limits are keyed by [`RequestContext::identity`], so they follow the
/// pipeline's forwarded-header policy.
pub struct RateLimitFilter {
    limiter: Arc<RateLimiter>,
}

impl RateLimitFilter {
    pub fn new(limiter: Arc<RateLimiter>) -> Self {
        Self { limiter }
    }
}

#[async_trait]
impl Filter for RateLimitFilter {
    fn name(&self) -> &'static str {
        "rate_limit"
    }

    async fn before(&self, ctx: &RequestContext) -> Result<(), AppError> {
        match self.limiter.check(ctx.identity()).await? {
            RateDecision::Allowed { .. } => Ok(()),
            RateDecision::Denied { retry_after } => Err(AppError::RateLimited { retry_after }),
        }
    }
}
