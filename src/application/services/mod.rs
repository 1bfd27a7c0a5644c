//! Business logic services for the application layer.

pub mod auth_service;
pub mod code_generator;
pub mod link_service;
pub mod rate_limiter;

pub use auth_service::AuthService;
pub use code_generator::CodeGenerator;
pub use link_service::LinkService;
pub use rate_limiter::{RateDecision, RateLimiter};
