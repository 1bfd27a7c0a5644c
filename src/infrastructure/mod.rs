//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Redis and in-process store implementations
//! - [`wordlist`] - Word corpus files

pub mod store;
pub mod wordlist;
