//! # QR Share
//!
//! A small web service that turns a submitted URL into a QR code and keeps the
//! current URL/image pair in a per-visitor session.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Validated URLs, session records, session store trait
//! - **Application Layer** ([`application`]) - The submit / image / current-URL pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory session stores
//! - **API Layer** ([`api`]) - Submission and image handlers, session middleware
//! - **Web Layer** ([`web`]) - HTML home page
//!
//! ## Endpoints
//!
//! - `GET /` - Home page showing the session's URL
//! - `POST /set_url` - Submit a URL (form field `url`)
//! - `GET /img.png` - QR code for the session's URL
//! - `GET /health` - Session store health
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"  # Optional
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{DEFAULT_URL, QrService, SubmitOutcome};
    pub use crate::domain::{SessionHandle, SessionId, SessionRecord, SessionStore, ValidatedUrl};
    pub use crate::error::AppError;
    pub use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore};
    pub use crate::state::AppState;
    pub use crate::utils::qr_encoder::QrEncoder;
    pub use crate::utils::url_validator::is_valid_url;
}
