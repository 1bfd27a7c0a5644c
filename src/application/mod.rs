//! Application layer services implementing business logic.
//!
//! Services consume store traits and provide a clean API for HTTP handlers
//! and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shorten, custom-shorten and redirect
//! - [`services::code_generator::CodeGenerator`] - Word-based code generation
//! - [`services::rate_limiter::RateLimiter`] - Rolling-window request limits
//! - [`services::auth_service::AuthService`] - Shared-secret authentication

pub mod services;
