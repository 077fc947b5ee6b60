//! Domain layer: entities, session identity, and storage contracts.
//!
//! - [`entities`] - Validated URLs and session records
//! - [`repositories`] - Session store trait
//! - [`session`] - Session ids and the per-request [`session::SessionHandle`]
//!
//! The domain layer has no dependency on HTTP or on a concrete storage backend.

pub mod entities;
pub mod repositories;
pub mod session;

pub use entities::{SessionRecord, ValidatedUrl};
pub use repositories::{SessionStore, SessionStoreError};
pub use session::{SessionHandle, SessionId};
