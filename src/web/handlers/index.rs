//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, header::HOST},
    response::IntoResponse,
};

use crate::domain::session::SessionHandle;
use crate::error::AppError;
use crate::state::AppState;

/// Template for the home page.
///
/// Renders `templates/index.html` with:
/// - The URL form prefilled with the session's current URL
/// - The QR image from `/img.png`
/// - A navbar link to the QR image when served from the navbar host
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub url: String,
    pub qr_in_navbar: bool,
}

/// Renders the home page.
///
/// # Endpoint
///
/// `GET /`
///
/// Shows the session's stored URL, or the default URL for an empty session. Reading
/// the page never stores anything.
pub async fn index_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let url = state.qr_service.current_url(&session).await?;

    let qr_in_navbar = headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .is_some_and(|host| host == &*state.navbar_host);

    Ok(IndexTemplate {
        url: url.into_string(),
        qr_in_navbar,
    })
}
