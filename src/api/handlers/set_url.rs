//! Handler for the URL submission endpoint.

use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::api::dto::set_url::SetUrlForm;
use crate::domain::session::SessionHandle;
use crate::error::AppError;
use crate::state::AppState;

/// Stores a submitted URL and its QR code in the visitor's session.
///
/// # Endpoint
///
/// `POST /set_url`
///
/// # Request Body
///
/// Form field `url`, urlencoded or multipart:
///
/// ```text
/// url=https%3A%2F%2Fexample.org%2Fpage
/// ```
///
/// # Responses
///
/// - **201 Created** `Success!` - URL stored, `/img.png` now serves its QR code
/// - **400 Bad Request** `No URL provided` - field missing or empty
/// - **400 Bad Request** `Invalid URL` - field present but not a valid URL
///
/// # Errors
///
/// Returns 500 if QR rendering fails, 500/503 if the session store fails.
pub async fn set_url_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    form: SetUrlForm,
) -> Result<Response, AppError> {
    let outcome = state
        .qr_service
        .submit(form.url.as_deref(), &session)
        .await?;

    Ok(outcome.into_response())
}
