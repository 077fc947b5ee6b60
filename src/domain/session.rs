//! Per-visitor session identity and the handle handlers use to reach its record.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::entities::{SessionRecord, ValidatedUrl};
use crate::domain::repositories::{SessionStore, SessionStoreResult};

/// Number of random bytes in a session id.
const SESSION_ID_BYTES: usize = 32;

/// Opaque session token: 32 random bytes, rendered as 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generates a fresh random session id.
    pub fn generate() -> Self {
        let bytes: [u8; SESSION_ID_BYTES] = rand::random();
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading characters of the id, safe to print in logs.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

/// Error returned when a cookie value is not a well-formed session id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed session id")]
pub struct InvalidSessionId;

impl FromStr for SessionId {
    type Err = InvalidSessionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == SESSION_ID_BYTES * 2
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        if well_formed {
            Ok(Self(s.to_string()))
        } else {
            Err(InvalidSessionId)
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed access to one visitor's session record.
///
/// Created per request by the session middleware and handed to handlers as a request
/// extension. Exposes exactly the two stored fields; writes always go through
/// [`SessionHandle::set`], which replaces both at once.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    store: Arc<dyn SessionStore>,
    is_new: bool,
    written: Arc<AtomicBool>,
}

impl SessionHandle {
    pub fn new(id: SessionId, store: Arc<dyn SessionStore>, is_new: bool) -> Self {
        Self {
            id,
            store,
            is_new,
            written: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns true if the visitor did not present a usable session cookie.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Returns true once a record has been written through this handle (or a clone).
    pub fn was_written(&self) -> bool {
        self.written.load(Ordering::Acquire)
    }

    /// Loads the full record.
    pub async fn record(&self) -> SessionStoreResult<Option<SessionRecord>> {
        self.store.load(&self.id).await
    }

    /// The stored URL, if any.
    pub async fn url(&self) -> SessionStoreResult<Option<ValidatedUrl>> {
        Ok(self.record().await?.map(|record| record.url))
    }

    /// The stored PNG bytes, if any.
    pub async fn image(&self) -> SessionStoreResult<Option<Vec<u8>>> {
        Ok(self.record().await?.map(|record| record.png))
    }

    /// Replaces the stored URL and image together.
    pub async fn set(&self, url: ValidatedUrl, png: Vec<u8>) -> SessionStoreResult<()> {
        let record = SessionRecord::new(url, png);
        self.store.save(&self.id, &record).await?;
        self.written.store(true, Ordering::Release);
        Ok(())
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id.short())
            .field("backend", &self.store.backend_name())
            .field("is_new", &self.is_new)
            .finish()
    }
}
