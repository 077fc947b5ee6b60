//! Core domain entities.
//!
//! - [`ValidatedUrl`] - A string the URL validator accepted
//! - [`SessionRecord`] - The (URL, QR image) pair stored per visitor

pub mod session_record;
pub mod validated_url;

pub use session_record::SessionRecord;
pub use validated_url::ValidatedUrl;
