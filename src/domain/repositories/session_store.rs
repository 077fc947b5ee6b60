//! Repository trait for per-visitor session records.

use crate::domain::entities::SessionRecord;
use crate::domain::session::SessionId;
use async_trait::async_trait;

/// Errors raised by a session backend.
///
/// Unlike a cache, a session store must not fail open: these errors are propagated to
/// the request so a broken backend is never mistaken for an empty session.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store connection error: {0}")]
    Connection(String),

    #[error("Session store operation error: {0}")]
    Operation(String),

    #[error("Corrupt session record: {0}")]
    Corrupt(String),
}

/// Result type for session store operations.
pub type SessionStoreResult<T> = Result<T, SessionStoreError>;

/// Storage contract for session records keyed by session id.
///
/// # Atomicity
///
/// [`SessionStore::save`] must replace the whole record in one operation, so a reader
/// never observes a URL paired with another URL's image.
///
/// # Implementations
///
/// - [`RedisSessionStore`](crate::infrastructure::session::RedisSessionStore) - Redis-backed,
///   shared across processes
/// - [`MemorySessionStore`](crate::infrastructure::session::MemorySessionStore) - In-process
///   map for single-node runs and tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the record for a session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if the session holds a live record
    /// - `Ok(None)` if the session is empty or expired
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when the backend is unreachable or the stored
    /// value cannot be decoded.
    async fn load(&self, id: &SessionId) -> SessionStoreResult<Option<SessionRecord>>;

    /// Replaces the record for a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError`] when the write fails; the previous record is then
    /// left as it was.
    async fn save(&self, id: &SessionId, record: &SessionRecord) -> SessionStoreResult<()>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and health output.
    fn backend_name(&self) -> &'static str;
}
