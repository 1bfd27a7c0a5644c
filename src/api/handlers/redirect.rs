//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Lookup Order
///
/// 1. Generated codes (`shortToLong`)
/// 2. Custom aliases (`customToLong`)
///
/// # Errors
///
/// Returns 404 Not Found if the code exists in neither table.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.redirect(&code).await?;

    let location = HeaderValue::try_from(link.long_url.as_str()).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code }),
        )
    })?;

    debug!("Redirecting {} ({}) to {}", code, link.kind.as_str(), link.long_url);

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
