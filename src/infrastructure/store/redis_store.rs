//! Redis-backed store implementation.

use crate::domain::entities::Table;
use crate::domain::repositories::{CounterStore, KeyTtl, KeyValueStore, StoreError};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis store holding the link tables as hashes and rate counters as plain
/// keys with a TTL.
///
/// Uses a shared `ConnectionManager`, cloned per call, for connection reuse
/// and automatic reconnection. Unlike a cache, errors propagate: a failed
/// round trip surfaces as [`StoreError`].
#[derive(Clone)]
pub struct RedisStore {
    client: ConnectionManager,
    counter_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)
            .map_err(|e| StoreError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            counter_prefix: "ratelimit:".to_string(),
        })
    }

    /// Constructs the counter key with namespace prefix.
    fn counter_key(&self, key: &str) -> String {
        format!("{}{}", self.counter_prefix, key)
    }
}

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() {
            StoreError::Connection(e.to_string())
        } else {
            StoreError::Command(e.to_string())
        }
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, table: Table, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.clone();
        let value = conn
            .hget::<_, _, Option<String>>(table.name(), key)
            .await?;

        debug!(
            "HGET {} {} -> {}",
            table,
            key,
            if value.is_some() { "hit" } else { "miss" }
        );
        Ok(value)
    }

    async fn set(&self, table: Table, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.client.clone();
        conn.hset::<_, _, _, ()>(table.name(), key, value).await?;

        debug!("HSET {} {}", table, key);
        Ok(())
    }

    async fn set_if_absent(
        &self,
        table: Table,
        key: &str,
        value: &str,
    ) -> Result<bool, StoreError> {
        let mut conn = self.client.clone();
        let created = conn
            .hset_nx::<_, _, _, bool>(table.name(), key, value)
            .await?;

        debug!("HSETNX {} {} -> {}", table, key, created);
        Ok(created)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[async_trait]
impl CounterStore for RedisStore {
    async fn count(&self, key: &str) -> Result<Option<u64>, StoreError> {
        let mut conn = self.client.clone();
        let value = conn.get::<_, Option<u64>>(self.counter_key(key)).await?;
        Ok(value)
    }

    async fn increment(&self, key: &str, ttl: Duration) -> Result<u64, StoreError> {
        let key = self.counter_key(key);
        let mut conn = self.client.clone();

        let (count, _armed): (u64, bool) = redis::pipe()
            .atomic()
            .incr(&key, 1)
            .expire(&key, ttl.as_secs() as i64)
            .query_async(&mut conn)
            .await?;

        debug!("INCR {} -> {} (TTL: {}s)", key, count, ttl.as_secs());
        Ok(count)
    }

    async fn ttl(&self, key: &str) -> Result<KeyTtl, StoreError> {
        let mut conn = self.client.clone();
        let reply = conn.ttl::<_, i64>(self.counter_key(key)).await?;
        Ok(KeyTtl::from_reply(reply))
    }
}
