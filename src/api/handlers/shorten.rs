//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{LinkForm, ShortenResponse};
use crate::api::middleware::RequestContext;
use crate::error::AppError;
use crate::state::AppState;

/// Creates (or returns the existing) generated short URL for `longurl`.
///
/// # Endpoint
///
/// `GET|POST /shorten`
///
/// # Parameters
///
/// `longurl` as query or urlencoded form field.
///
/// # Response
///
/// `201 Created` for a new link, `200 OK` if the URL was shortened before:
///
/// ```json
/// {
///   "longurl": "https://example.com/some/long/path",
///   "shorturl": "https://s.example.com/bluecat"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 for a missing or invalid `longurl`. Rate limiting (429) is
/// applied by the route's pipeline before this handler runs.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let form = LinkForm::shorten(&ctx)?;

    let link = state.link_service.shorten(&form.longurl).await?;

    let status = if link.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortenResponse {
            shorturl: state.link_service.short_url(&link.code),
            longurl: link.long_url,
        }),
    ))
}
