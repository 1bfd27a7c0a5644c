//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into link service operations and
//! formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Filter pipeline: validation, auth, rate limiting, logging, CORS
//! - [`routes`] - Route configuration and pipeline composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
