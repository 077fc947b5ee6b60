//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::index_handler;
use axum::{Router, routing::get};

/// Session-bound page routes.
///
/// # Endpoints
///
/// - `GET /` - Home page
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/", get(index_handler))
}
