//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`          - Home page (session)
//! - `POST /set_url`   - URL submission (session)
//! - `GET  /img.png`   - QR image (session)
//! - `GET  /health`    - Health check
//! - `/static/*`       - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Session** - Cookie-carried session handle on the three session routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{session, tracing};
use crate::state::AppState;
use crate::web;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the router with all routes and middleware except path normalization.
///
/// Used directly by integration tests; the server wraps it with [`app_router`].
pub fn router(state: AppState) -> Router {
    let session_router = Router::new()
        .merge(web::routes::session_routes())
        .merge(api::routes::session_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), session::layer));

    Router::new()
        .merge(session_router)
        .merge(api::routes::public_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
