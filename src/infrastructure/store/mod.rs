//! Backing stores for link tables and rate counters.
//!
//! Both implementations satisfy [`crate::domain::repositories::KeyValueStore`]
//! and [`crate::domain::repositories::CounterStore`]:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for tests and local runs

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

use crate::domain::repositories::{CounterStore, KeyValueStore, StoreError};
use std::sync::Arc;

/// URL scheme selecting [`MemoryStore`].
pub const MEMORY_STORE_URL: &str = "memory://";

/// Shared handles to the store, created once at startup.
#[derive(Clone)]
pub struct StoreHandles {
    pub links: Arc<dyn KeyValueStore>,
    pub counters: Arc<dyn CounterStore>,
}

impl StoreHandles {
    /// Uses one object for both roles.
    pub fn shared<S>(store: Arc<S>) -> Self
    where
        S: KeyValueStore + CounterStore + 'static,
    {
        Self {
            links: store.clone(),
            counters: store,
        }
    }
}

/// Opens the store named by `url`.
///
/// `memory://` selects the in-process store; anything else is handed to Redis.
///
/// # Errors
///
/// Returns [`StoreError::Connection`] if Redis cannot be reached.
pub async fn open(url: &str) -> Result<StoreHandles, StoreError> {
    if url.starts_with(MEMORY_STORE_URL) {
        tracing::warn!("Using in-process MemoryStore; links are lost on restart");
        return Ok(StoreHandles::shared(Arc::new(MemoryStore::new())));
    }

    let redis = RedisStore::connect(url).await?;
    Ok(StoreHandles::shared(Arc::new(redis)))
}
