//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Fallback suffixes and custom alias validation
//! - [`client_identity`] - Client identity extraction from request metadata

pub mod client_identity;
pub mod code_generator;
