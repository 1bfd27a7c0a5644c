//! Data Transfer Objects for API requests and responses.
//!
//! Request parameters arrive as query or form fields and are validated with
//! validator; responses are serialized to JSON with Serde.

pub mod health;
pub mod shorten;
