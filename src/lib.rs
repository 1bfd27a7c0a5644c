//! # wordlink
//!
//! A word-based URL shortener built with Axum and Redis. Generated short
//! codes are concatenations of one random word from each configured word
//! list (`bluecat`, `swiftotter`), and callers may register custom aliases.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and store traits
//! - **Application Layer** ([`application`]) - Link, generation, rate limit and auth services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores, word list loading
//! - **API Layer** ([`api`]) - Handlers, DTOs and the request filter pipeline
//!
//! ## Storage
//!
//! Links live in three Redis hashes: `longToShort` and `shortToLong` for
//! generated codes, `customToLong` for custom aliases. Rate limit counters
//! are plain keys with a TTL.
//!
//! ## Quick Start
//!
//! ```bash
//! export WORD_FILES="words/adjectives.txt,words/animals.txt"
//! export REDIS_URL="redis://localhost:6379/0"   # or memory:// for a throwaway store
//! export LINK_PASSWORD="change-me"              # optional, guards /customshorten
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, CodeGenerator, LinkService, RateDecision, RateLimiter,
    };
    pub use crate::domain::entities::{CodeKind, Corpus, ShortLink, Table};
    pub use crate::domain::repositories::{CounterStore, KeyValueStore, StoreError};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore, StoreHandles};
    pub use crate::state::AppState;
}
