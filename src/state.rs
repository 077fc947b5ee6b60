//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::api::middleware::session::SessionCookie;
use crate::application::services::QrService;
use crate::domain::repositories::SessionStore;

/// Immutable handles built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub qr_service: Arc<QrService>,
    pub session_store: Arc<dyn SessionStore>,
    pub session_cookie: Arc<SessionCookie>,
    /// Host that enables the navbar QR link on the home page.
    pub navbar_host: Arc<str>,
}

impl AppState {
    pub fn new(
        qr_service: QrService,
        session_store: Arc<dyn SessionStore>,
        session_cookie: SessionCookie,
        navbar_host: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            qr_service: Arc::new(qr_service),
            session_store,
            session_cookie: Arc::new(session_cookie),
            navbar_host: navbar_host.into(),
        }
    }
}
