//! Store trait for link table access.

use crate::domain::entities::Table;
use crate::domain::repositories::StoreError;
use async_trait::async_trait;

/// Table-partitioned string map holding link records.
///
/// Every call is an independent round trip to the backing store; no
/// transaction spans several calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis hashes
/// - [`crate::infrastructure::store::MemoryStore`] - In-process maps for tests and local runs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads `key` from `table`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if present
    /// - `Ok(None)` if absent; a miss is not an error
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store cannot be reached or answers unexpectedly.
    async fn get(&self, table: Table, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `key` → `value` into `table`, overwriting any previous value.
    async fn set(&self, table: Table, key: &str, value: &str) -> Result<(), StoreError>;

    /// Writes `key` → `value` only if `key` is absent from `table`.
    ///
    /// Returns `true` if this call created the entry.
    async fn set_if_absent(&self, table: Table, key: &str, value: &str)
    -> Result<bool, StoreError>;

    /// Checks if the store answers.
    async fn health_check(&self) -> bool;
}
