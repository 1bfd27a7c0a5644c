//! Store trait for expiring request counters.

use crate::domain::repositories::StoreError;
use async_trait::async_trait;
use std::time::Duration;

/// Remaining lifetime of a counter key as reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// Key is absent (never set, or already expired).
    Missing,
    /// Key exists without an expiry.
    Persistent,
    /// Key expires after this many seconds.
    Expires(u64),
}

impl KeyTtl {
    /// Maps a Redis `TTL` reply (`-2`, `-1`, or seconds).
    pub fn from_reply(reply: i64) -> Self {
        match reply {
            r if r < -1 => Self::Missing,
            -1 => Self::Persistent,
            secs => Self::Expires(secs as u64),
        }
    }
}

/// String-to-integer counters that expire on their own.
///
/// The service never deletes counters; the store's TTL does.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Current value of `key`, or `None` if absent or expired.
    async fn count(&self, key: &str) -> Result<Option<u64>, StoreError>;

    /// Increments `key` (creating it at 1) and re-arms its expiry to `ttl`.
    ///
    /// Both steps happen in a single round trip. Returns the new value.
    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError>;

    /// Remaining lifetime of `key`.
    async fn ttl(&self, key: &str) -> Result<KeyTtl, StoreError>;
}
