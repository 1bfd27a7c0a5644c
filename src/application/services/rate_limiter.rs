//! Rolling-window rate limiting backed by expiring store counters.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::repositories::{CounterStore, KeyTtl};
use crate::error::AppError;
use tracing::{debug, error, warn};

/// Outcome of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request may proceed; `count` requests are on record in the window.
    Allowed { count: u64 },
    /// The request is refused; retry after this many seconds (never zero).
    Denied { retry_after: u64 },
}

/// Allows `limit` requests per identity per `window`.
///
/// Every accepted request re-arms the counter's TTL to the full window, so
/// the window rolls forward while a client keeps sending; it resets only after
/// `window` passes without an accepted request.
///
/// # Consistency
///
/// The read and the increment are separate round trips. Concurrent requests
/// from one identity can each see a count below the limit and overshoot it by
/// the number of requests in flight.
pub struct RateLimiter {
    store: Arc<dyn CounterStore>,
    window: Duration,
    limit: u64,
}

impl RateLimiter {
    /// Creates a limiter allowing `limit` requests per `window`.
    pub fn new(store: Arc<dyn CounterStore>, window: Duration, limit: u64) -> Self {
        Self {
            store,
            window,
            limit,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    fn window_secs(&self) -> u64 {
        self.window.as_secs().max(1)
    }

    /// Records a request from `identity` and decides whether it may proceed.
    ///
    /// # Flow
    ///
    /// 1. Read the current count (absent counts as zero)
    /// 2. Below the limit: increment and re-arm the TTL, allow
    /// 3. Otherwise: read the remaining TTL and deny with it as retry guidance
    ///
    /// If the counter vanished between steps 1 and 3, or carries no TTL, the
    /// request is denied with the full window as retry guidance.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn check(&self, identity: &str) -> Result<RateDecision, AppError> {
        let count = self.store.count(identity).await?.unwrap_or(0);

        if count < self.limit {
            let count = self.store.increment(identity, self.window).await?;
            debug!("{} - request {}/{} in window", identity, count, self.limit);
            return Ok(RateDecision::Allowed { count });
        }

        let retry_after = match self.store.ttl(identity).await? {
            KeyTtl::Expires(secs) => secs.max(1),
            KeyTtl::Persistent => {
                warn!("{} - rate counter has no expiry", identity);
                self.window_secs()
            }
            KeyTtl::Missing => {
                error!(
                    "{} - rate counter at {} vanished before its TTL was read",
                    identity, count
                );
                self.window_secs()
            }
        };

        metrics::counter!("rate_limited_total").increment(1);
        debug!("{} - rate limited, retry after {}s", identity, retry_after);

        Ok(RateDecision::Denied { retry_after })
    }
}
