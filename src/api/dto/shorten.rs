//! DTOs for the link creation endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::middleware::RequestContext;
use crate::error::AppError;

/// Parameters of `/shorten` and `/customshorten`.
///
/// `customurl` is only read on `/customshorten`; its character set and
/// reserved names are checked by the link service.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkForm {
    #[validate(length(min = 1, max = 8192))]
    pub longurl: String,

    #[validate(length(min = 1, max = 64))]
    pub customurl: Option<String>,
}

impl LinkForm {
    /// Reads `longurl` from the request context and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingParameter`] or [`AppError::Validation`].
    pub fn shorten(ctx: &RequestContext) -> Result<Self, AppError> {
        let form = Self {
            longurl: ctx.require("longurl")?.to_string(),
            customurl: None,
        };
        form.validate()?;
        Ok(form)
    }

    /// Reads `longurl` and `customurl` from the request context and
    /// validates them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingParameter`] or [`AppError::Validation`].
    pub fn custom(ctx: &RequestContext) -> Result<Self, AppError> {
        let form = Self {
            longurl: ctx.require("longurl")?.to_string(),
            customurl: Some(ctx.require("customurl")?.to_string()),
        };
        form.validate()?;
        Ok(form)
    }
}

/// Response for a created or existing short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub longurl: String,
    pub shorturl: String,
}
