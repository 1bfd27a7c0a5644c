//! Handler for custom alias registration.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{LinkForm, ShortenResponse};
use crate::api::middleware::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Registers `customurl` as an alias for `longurl`.
///
/// # Endpoint
///
/// `POST /customshorten`
///
/// # Parameters
///
/// - `longurl` - target URL
/// - `customurl` - requested alias, 1-64 of `[A-Za-z0-9_-]`
/// - `password` - shared secret, checked by the pipeline when configured
///
/// # Errors
///
/// - 400 for a missing, malformed or reserved alias
/// - 401 for a wrong password
/// - 409 if the alias is already a custom alias or a generated code
pub async fn custom_shorten_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let form = LinkForm::custom(&ctx)?;
    let alias = form.customurl.unwrap_or_default();

    let link = state
        .link_service
        .custom_shorten(&form.longurl, &alias)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            shorturl: state.link_service.short_url(&link.code),
            longurl: link.long_url,
        }),
    ))
}
