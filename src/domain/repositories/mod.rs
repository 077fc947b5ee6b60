//! Repository trait definitions for the domain layer.
//!
//! Traits define the storage contracts; implementations live in
//! `crate::infrastructure::session`. Mock implementations are generated via `mockall`
//! for unit tests.

pub mod session_store;

pub use session_store::{SessionStore, SessionStoreError, SessionStoreResult};

#[cfg(test)]
pub use session_store::MockSessionStore;
