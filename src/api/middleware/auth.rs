//! Shared-secret authentication filter.

use std::sync::Arc;

use async_trait::async_trait;

use super::pipeline::{Filter, RequestContext};
use crate::application::services::AuthService;
use crate::error::AppError;

/// Form/query parameter carrying the shared secret.
pub const PASSWORD_PARAM: &str = "password";

/// Authenticates requests using the `password` parameter.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` when a secret is configured and the
/// parameter is missing or wrong. With no secret configured every request
/// passes.
pub struct SharedSecretFilter {
    auth: Arc<AuthService>,
}

impl SharedSecretFilter {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl Filter for SharedSecretFilter {
    fn name(&self) -> &'static str {
        "shared_secret"
    }

    async fn before(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.auth.authenticate(ctx.param(PASSWORD_PARAM))
    }
}
