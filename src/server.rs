//! HTTP server initialization and runtime setup.
//!
//! Handles session backend selection, state construction, and the Axum server
//! lifecycle including graceful shutdown.

use crate::api::middleware::session::SessionCookie;
use crate::application::services::QrService;
use crate::config::Config;
use crate::domain::repositories::SessionStore;
use crate::infrastructure::session::{MemorySessionStore, RedisSessionStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::qr_encoder::QrEncoder;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made against Redis before falling back to memory.
const REDIS_CONNECT_ATTEMPTS: usize = 3;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Session store (Redis, or in-memory fallback)
/// - QR service with its default URL self-check
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The default URL fails validation
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config).await?;

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the shared application state from configuration.
///
/// # Errors
///
/// Returns an error if the configured default URL does not pass validation.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let encoder = QrEncoder::new(config.qr_module_size);
    let qr_service = QrService::new(encoder, &config.default_url)
        .context("Refusing to start: default URL is not a valid URL")?;

    let session_store = connect_session_store(config).await;

    Ok(AppState::new(
        qr_service,
        session_store,
        SessionCookie::new(&config.session_cookie_name, config.session_cookie_secure),
        config.navbar_host.as_str(),
    ))
}

/// Selects the session backend.
///
/// Connects to Redis with exponential back-off when configured; falls back to the
/// in-memory store if Redis is not configured or stays unreachable.
async fn connect_session_store(config: &Config) -> Arc<dyn SessionStore> {
    let ttl = config.session_ttl_seconds;

    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Sessions stored in memory (Redis not configured)");
        return Arc::new(MemorySessionStore::new(Duration::from_secs(ttl)));
    };

    let strategy = ExponentialBackoff::from_millis(10)
        .factor(10)
        .max_delay(Duration::from_secs(2))
        .map(jitter)
        .take(REDIS_CONNECT_ATTEMPTS - 1);

    match Retry::spawn(strategy, || RedisSessionStore::connect(redis_url, ttl)).await {
        Ok(store) => {
            tracing::info!("Sessions stored in Redis");
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using in-memory sessions.", e);
            Arc::new(MemorySessionStore::new(Duration::from_secs(ttl)))
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
