//! Application layer services implementing the request pipeline.
//!
//! Services combine domain types, pure helpers and the session handle into the
//! operations HTTP handlers call.
//!
//! # Available Services
//!
//! - [`services::qr_service::QrService`] - URL submission, QR retrieval and default fallback

pub mod services;
