//! Pure helpers used across the application.
//!
//! - [`url_validator`] - Syntactic URL validation
//! - [`qr_encoder`] - QR code rendering to PNG

pub mod qr_encoder;
pub mod url_validator;
