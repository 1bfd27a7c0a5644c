//! In-process store implementation for tests and local development.

use crate::domain::entities::Table;
use crate::domain::repositories::{CounterStore, KeyTtl, KeyValueStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct Counter {
    value: u64,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<Table, HashMap<String, String>>,
    counters: HashMap<String, Counter>,
}

/// A store that keeps everything in memory.
///
/// Mirrors the Redis semantics the service relies on (hash tables, `HSETNX`,
/// `INCR` + `EXPIRE`, `TTL`) so services and handlers can be exercised without
/// a server. Expiry follows the tokio clock, which lets tests pause and
/// advance time.
///
/// # Use Cases
///
/// - Integration tests
/// - Local development with `REDIS_URL=memory://`
///
/// State is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using MemoryStore (state is not persisted)");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::Command("memory store lock poisoned".to_string()))
    }

    /// Number of entries in `table`.
    pub fn table_len(&self, table: Table) -> usize {
        self.lock()
            .map(|state| state.tables.get(&table).map_or(0, HashMap::len))
            .unwrap_or(0)
    }

    /// Number of live (unexpired) counters.
    pub fn counter_len(&self) -> usize {
        let now = Instant::now();
        self.lock()
            .map(|state| {
                state
                    .counters
                    .values()
                    .filter(|c| c.expires_at > now)
                    .count()
            })
            .unwrap_or(0)
    }
}

/// Drops `key` if its deadline has passed and returns the live counter.
fn live_counter<'a>(state: &'a mut State, key: &str, now: Instant) -> Option<&'a mut Counter> {
    if state
        .counters
        .get(key)
        .is_some_and(|c| c.expires_at <= now)
    {
        state.counters.remove(key);
    }
    state.counters.get_mut(key)
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, table: Table, key: &str) -> Result<Option<String>, StoreError> {
        let state = self.lock()?;
        Ok(state.tables.get(&table).and_then(|t| t.get(key)).cloned())
    }

    async fn set(&self, table: Table, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        state
            .tables
            .entry(table)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn set_if_absent(
        &self,
        table: Table,
        key: &str,
        value: &str,
    ) -> Result<bool, StoreError> {
        let mut state = self.lock()?;
        let entries = state.tables.entry(table).or_default();

        if entries.contains_key(key) {
            return Ok(false);
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        self.lock().is_ok()
    }
}

#[async_trait]
impl CounterStore for MemoryStore {
    async fn count(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let mut state = self.lock()?;
        Ok(live_counter(&mut state, key, Instant::now()).map(|c| c.value))
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let now = Instant::now();
        let mut state = self.lock()?;

        let value = match live_counter(&mut state, key, now) {
            Some(counter) => {
                counter.value += 1;
                counter.expires_at = now + ttl;
                counter.value
            }
            None => {
                state.counters.insert(
                    key.to_string(),
                    Counter {
                        value: 1,
                        expires_at: now + ttl,
                    },
                );
                1
            }
        };

        Ok(value)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl, StoreError> {
        let now = Instant::now();
        let mut state = self.lock()?;

        Ok(match live_counter(&mut state, key, now) {
            Some(counter) => {
                let remaining = counter.expires_at.saturating_duration_since(now);
                // Round up so a live key never reports zero seconds left.
                let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
                KeyTtl::Expires(secs)
            }
            None => KeyTtl::Missing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = MemoryStore::new();

        let value = store.get(Table::ShortToLong, "redcat").await.unwrap();

        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_tables_are_independent() {
        let store = MemoryStore::new();
        store
            .set(Table::ShortToLong, "redcat", "https://example.com")
            .await
            .unwrap();

        assert!(store.get(Table::CustomToLong, "redcat").await.unwrap().is_none());
        assert_eq!(store.table_len(Table::ShortToLong), 1);
        assert_eq!(store.table_len(Table::LongToShort), 0);
    }

    #[tokio::test]
    async fn test_set_if_absent_keeps_first_value() {
        let store = MemoryStore::new();

        assert!(
            store
                .set_if_absent(Table::CustomToLong, "promo", "https://a.example")
                .await
                .unwrap()
        );
        assert!(
            !store
                .set_if_absent(Table::CustomToLong, "promo", "https://b.example")
                .await
                .unwrap()
        );

        let value = store.get(Table::CustomToLong, "promo").await.unwrap();
        assert_eq!(value.as_deref(), Some("https://a.example"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_counter_expires_after_ttl() {
        let store = MemoryStore::new();
        let ttl = Duration::from_secs(10);

        assert_eq!(store.increment("10.0.0.1", ttl).await.unwrap(), 1);
        assert_eq!(store.increment("10.0.0.1", ttl).await.unwrap(), 2);
        assert_eq!(store.ttl("10.0.0.1").await.unwrap(), KeyTtl::Expires(10));

        tokio::time::advance(Duration::from_millis(10_001)).await;

        assert_eq!(store.count("10.0.0.1").await.unwrap(), None);
        assert_eq!(store.ttl("10.0.0.1").await.unwrap(), KeyTtl::Missing);
        assert_eq!(store.increment("10.0.0.1", ttl).await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_increment_rearms_ttl() {
        let store = MemoryStore::new();
        let ttl = Duration::from_secs(10);

        store.increment("client", ttl).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        store.increment("client", ttl).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(store.count("client").await.unwrap(), Some(2));
        assert_eq!(store.ttl("client").await.unwrap(), KeyTtl::Expires(4));
    }
}
