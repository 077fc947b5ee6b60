//! Handler for the QR image endpoint.

use axum::{
    Extension,
    extract::State,
    http::{
        HeaderName, HeaderValue,
        header::{CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA},
    },
    response::IntoResponse,
};

use crate::domain::session::SessionHandle;
use crate::error::AppError;
use crate::state::AppState;

const X_ROBOTS_TAG: HeaderName = HeaderName::from_static("x-robots-tag");

/// Returns the session's QR code as PNG.
///
/// # Endpoint
///
/// `GET /img.png`
///
/// # Behavior
///
/// Serves the image stored by the last successful `POST /set_url`. A session with
/// nothing stored gets the default URL's QR code, which is saved so later requests
/// return the same bytes.
///
/// # Response Headers
///
/// ```text
/// Content-Type: image/png
/// Cache-Control: no-cache, no-store, must-revalidate
/// Expires: 0
/// Pragma: no-cache
/// X-Robots-Tag: no-index
/// ```
///
/// # Errors
///
/// Returns 500 if QR rendering fails, 500/503 if the session store fails.
pub async fn image_handler(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
) -> Result<impl IntoResponse, AppError> {
    let png = state.qr_service.get_image(&session).await?;

    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (
                CACHE_CONTROL,
                HeaderValue::from_static("no-cache, no-store, must-revalidate"),
            ),
            (EXPIRES, HeaderValue::from_static("0")),
            (PRAGMA, HeaderValue::from_static("no-cache")),
            (X_ROBOTS_TAG, HeaderValue::from_static("no-index")),
        ],
        png,
    ))
}
