#![allow(dead_code)]

use axum::http::{HeaderValue, header::SET_COOKIE};
use axum_test::{TestResponse, TestServer};
use std::sync::Arc;
use std::time::Duration;

use qr_share::api::middleware::session::SessionCookie;
use qr_share::application::services::{DEFAULT_URL, QrService};
use qr_share::domain::ValidatedUrl;
use qr_share::domain::repositories::SessionStore;
use qr_share::infrastructure::session::MemorySessionStore;
use qr_share::routes::router;
use qr_share::state::AppState;
use qr_share::utils::qr_encoder::QrEncoder;

/// Small modules keep test images cheap to render.
pub const TEST_MODULE_SIZE: u32 = 2;

pub const NAVBAR_HOST: &str = "turnerforever.com";

pub fn create_test_state_with_store(store: Arc<dyn SessionStore>) -> AppState {
    let qr_service = QrService::new(QrEncoder::new(TEST_MODULE_SIZE), DEFAULT_URL).unwrap();

    AppState::new(qr_service, store, SessionCookie::default(), NAVBAR_HOST)
}

pub fn create_test_state() -> AppState {
    create_test_state_with_store(Arc::new(MemorySessionStore::new(Duration::from_secs(3600))))
}

pub fn create_test_server() -> TestServer {
    TestServer::new(router(create_test_state())).unwrap()
}

/// PNG the service is expected to return for `url`.
pub fn expected_png(url: &str) -> Vec<u8> {
    QrEncoder::new(TEST_MODULE_SIZE)
        .encode(&ValidatedUrl::parse(url).unwrap())
        .unwrap()
}

/// Returns the `name=value` pair of the response's session cookie, if one was set.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn cookie_header(cookie: &str) -> HeaderValue {
    HeaderValue::from_str(cookie).unwrap()
}
