//! In-process session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::SessionRecord;
use crate::domain::repositories::{SessionStore, SessionStoreResult};
use crate::domain::session::SessionId;

struct Entry {
    record: SessionRecord,
    expires_at: Instant,
}

/// Session store backed by a map behind an async `RwLock`.
///
/// Used when Redis is not configured or unreachable, and in tests. Records live until
/// `ttl` after their last write; expired entries read as absent and are purged on the
/// next write. Contents are lost on restart.
pub struct MemorySessionStore {
    entries: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        debug!("Using in-memory session store (TTL: {}s)", ttl.as_secs());
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> SessionStoreResult<Option<SessionRecord>> {
        let entries = self.entries.read().await;

        Ok(entries
            .get(id)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.record.clone()))
    }

    async fn save(&self, id: &SessionId, record: &SessionRecord) -> SessionStoreResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            id.clone(),
            Entry {
                record: record.clone(),
                expires_at: now + self.ttl,
            },
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ValidatedUrl;

    fn record(url: &str, png: &[u8]) -> SessionRecord {
        SessionRecord::new(ValidatedUrl::parse(url).unwrap(), png.to_vec())
    }

    #[tokio::test]
    async fn test_load_missing() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        assert!(store.load(&SessionId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let id = SessionId::generate();
        let rec = record("https://example.com", &[1, 2, 3]);

        store.save(&id, &rec).await.unwrap();

        assert_eq!(store.load(&id).await.unwrap(), Some(rec));
    }

    #[tokio::test]
    async fn test_save_replaces_whole_record() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let id = SessionId::generate();

        store
            .save(&id, &record("https://example.com/a", &[1]))
            .await
            .unwrap();
        store
            .save(&id, &record("https://example.com/b", &[2, 2]))
            .await
            .unwrap();

        let loaded = store.load(&id).await.unwrap().unwrap();
        assert_eq!(loaded.url.as_str(), "https://example.com/b");
        assert_eq!(loaded.png, vec![2, 2]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_isolated() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        let a = SessionId::generate();
        let b = SessionId::generate();

        store
            .save(&a, &record("https://example.com/a", &[1]))
            .await
            .unwrap();

        assert!(store.load(&b).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entries_read_as_absent_and_are_purged() {
        let store = MemorySessionStore::new(Duration::ZERO);
        let id = SessionId::generate();

        store
            .save(&id, &record("https://example.com", &[1]))
            .await
            .unwrap();
        assert!(store.load(&id).await.unwrap().is_none());

        store
            .save(&SessionId::generate(), &record("https://example.com", &[1]))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = MemorySessionStore::new(Duration::from_secs(60));
        assert!(store.health_check().await);
        assert_eq!(store.backend_name(), "memory");
    }
}
