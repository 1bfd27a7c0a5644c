//! Store trait definitions for the domain layer.
//!
//! These traits abstract the external key-value store the service keeps its
//! state in. Concrete stores live in `crate::infrastructure::store`.
//!
//! # Available Stores
//!
//! - [`KeyValueStore`] - The three link tables
//! - [`CounterStore`] - Expiring counters used by rate limiting
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod counter_store;
pub mod link_store;

pub use counter_store::{CounterStore, KeyTtl};
pub use link_store::KeyValueStore;

#[cfg(test)]
pub use counter_store::MockCounterStore;
#[cfg(test)]
pub use link_store::MockKeyValueStore;

use thiserror::Error;

/// Failure talking to the backing store.
///
/// A missing key is never a `StoreError`; lookups return `Ok(None)` instead.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command error: {0}")]
    Command(String),
}
