//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, error, info};

use crate::domain::entities::SessionRecord;
use crate::domain::repositories::{SessionStore, SessionStoreError, SessionStoreResult};
use crate::domain::session::SessionId;

/// Namespace prefix for session keys.
const KEY_PREFIX: &str = "qr_session:";

/// Session store keeping each record as one JSON value with a TTL.
///
/// Uses a `ConnectionManager` for connection reuse and automatic reconnection. A record
/// is written with a single `SET EX`, so the URL and image are replaced together.
/// Errors are propagated to callers rather than treated as misses.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `ttl_seconds` - Lifetime of a record after its last write
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> SessionStoreResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionStoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionStoreError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionStoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis session store");

        Ok(Self {
            client: manager,
            ttl_seconds,
        })
    }

    fn build_key(id: &SessionId) -> String {
        format!("{}{}", KEY_PREFIX, id)
    }
}

/// Maps a Redis error to the store error taxonomy.
fn map_redis_error(e: redis::RedisError) -> SessionStoreError {
    if e.is_io_error() || e.is_connection_dropped() || e.is_connection_refusal() || e.is_timeout()
    {
        SessionStoreError::Connection(e.to_string())
    } else {
        SessionStoreError::Operation(e.to_string())
    }
}

/// Serializes a record into the stored representation.
pub(crate) fn encode_record(record: &SessionRecord) -> SessionStoreResult<String> {
    serde_json::to_string(record).map_err(|e| SessionStoreError::Operation(e.to_string()))
}

/// Parses the stored representation back into a record.
pub(crate) fn decode_record(raw: &str) -> SessionStoreResult<SessionRecord> {
    serde_json::from_str(raw).map_err(|e| SessionStoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> SessionStoreResult<Option<SessionRecord>> {
        let key = Self::build_key(id);
        let mut conn = self.client.clone();

        let raw = conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            error!("Redis GET error for session {}: {}", id.short(), e);
            map_redis_error(e)
        })?;

        match raw {
            Some(raw) => {
                debug!("Session HIT: {}", id.short());
                decode_record(&raw).map(Some)
            }
            None => {
                debug!("Session MISS: {}", id.short());
                Ok(None)
            }
        }
    }

    async fn save(&self, id: &SessionId, record: &SessionRecord) -> SessionStoreResult<()> {
        let key = Self::build_key(id);
        let value = encode_record(record)?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&key, value, self.ttl_seconds)
            .await
            .map_err(|e| {
                error!("Redis SET error for session {}: {}", id.short(), e);
                map_redis_error(e)
            })?;

        debug!(
            "Session SET: {} -> {} (TTL: {}s)",
            id.short(),
            record.url,
            self.ttl_seconds
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
