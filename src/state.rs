//! Shared application state injected into handlers and pipelines.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, RateLimiter};
use crate::domain::repositories::KeyValueStore;

/// Cloned into every request; all members are shared handles.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub auth_service: Arc<AuthService>,
    /// Link store, used directly by health checks.
    pub store: Arc<dyn KeyValueStore>,
    /// Trust `X-Forwarded-For` / `X-Real-IP` for client identity.
    pub behind_proxy: bool,
}
