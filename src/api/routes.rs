//! API route configuration.

use crate::api::handlers::{health_handler, image_handler, set_url_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Session-bound pipeline routes.
///
/// Requires [`crate::api::middleware::session`] to be layered on top, which supplies
/// the [`crate::domain::session::SessionHandle`] extension.
///
/// # Endpoints
///
/// - `POST /set_url` - Submit a URL for the current session
/// - `GET  /img.png` - QR code for the current session
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/set_url", post(set_url_handler))
        .route("/img.png", get(image_handler))
}

/// Routes that do not touch the session.
///
/// # Endpoints
///
/// - `GET /health` - Session store health check
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
