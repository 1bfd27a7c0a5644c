//! HTTP request handlers for the public endpoints.
//!
//! Handlers run inside their route's filter pipeline and read parameters
//! from [`crate::api::middleware::RequestContext`].

pub mod custom_shorten;
pub mod health;
pub mod landing;
pub mod redirect;
pub mod shorten;

pub use custom_shorten::custom_shorten_handler;
pub use health::health_handler;
pub use landing::landing_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
