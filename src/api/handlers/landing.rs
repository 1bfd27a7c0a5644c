//! Landing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

/// Template for the landing page.
///
/// Renders `templates/index.html`: a single input that posts `longurl` to
/// `/shorten` and shows the returned short URL.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct IndexTemplate {
    base_url: String,
}

/// Renders the landing page.
///
/// # Endpoint
///
/// `GET /`
pub async fn landing_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate {
        base_url: state.link_service.base_url().to_string(),
    }
}
