//! URL-to-QR session pipeline.

use serde_json::json;
use tracing::{debug, info};

use crate::domain::entities::ValidatedUrl;
use crate::domain::session::SessionHandle;
use crate::error::AppError;
use crate::utils::qr_encoder::QrEncoder;

/// URL shown and encoded for sessions that have not submitted one yet.
pub const DEFAULT_URL: &str = "https://example.com";

/// Result of a URL submission that did not fail unexpectedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No `url` value, or an empty one.
    MissingInput,
    /// A value was given but is not a valid URL.
    InvalidInput,
    /// The URL and its QR image replaced the session record.
    Success,
}

/// Service tying validation, QR encoding and session persistence together.
///
/// Holds no per-session state; every read goes through the [`SessionHandle`] passed in.
#[derive(Debug, Clone)]
pub struct QrService {
    encoder: QrEncoder,
    default_url: ValidatedUrl,
}

impl QrService {
    /// Creates the service, checking the default URL once.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if `default_url` does not pass validation; the
    /// server refuses to start in that case.
    pub fn new(encoder: QrEncoder, default_url: &str) -> Result<Self, AppError> {
        let default_url = ValidatedUrl::parse(default_url).ok_or_else(|| {
            AppError::internal(
                "Default URL failed validation",
                json!({ "default_url": default_url }),
            )
        })?;

        Ok(Self {
            encoder,
            default_url,
        })
    }

    pub fn default_url(&self) -> &ValidatedUrl {
        &self.default_url
    }

    /// Validates a submitted URL and, if it passes, stores it with its QR image.
    ///
    /// # Flow
    ///
    /// 1. Missing or empty input returns [`SubmitOutcome::MissingInput`]
    /// 2. Input rejected by the validator returns [`SubmitOutcome::InvalidInput`]
    /// 3. Otherwise the image is rendered and the record replaced in one write
    ///
    /// The session is untouched unless the outcome is [`SubmitOutcome::Success`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails and propagates session store
    /// failures.
    pub async fn submit(
        &self,
        candidate: Option<&str>,
        session: &SessionHandle,
    ) -> Result<SubmitOutcome, AppError> {
        let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
            debug!(session = session.id().short(), "Submission without URL");
            return Ok(SubmitOutcome::MissingInput);
        };

        let Some(url) = ValidatedUrl::parse(candidate) else {
            debug!(session = session.id().short(), "Rejected invalid URL");
            return Ok(SubmitOutcome::InvalidInput);
        };

        let png = self.encoder.encode(&url)?;
        let bytes = png.len();
        let host = url.host().unwrap_or_default();
        session.set(url, png).await?;
        info!(
            session = session.id().short(),
            bytes,
            host = %host,
            "Stored QR code"
        );

        Ok(SubmitOutcome::Success)
    }

    /// Returns the session's QR image, materializing the default record on first read.
    ///
    /// The default image is rendered on each miss rather than cached at startup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails and propagates session store
    /// failures.
    pub async fn get_image(&self, session: &SessionHandle) -> Result<Vec<u8>, AppError> {
        if let Some(png) = session.image().await? {
            return Ok(png);
        }

        let png = self.encoder.encode(&self.default_url)?;
        session.set(self.default_url.clone(), png.clone()).await?;
        debug!(
            session = session.id().short(),
            "Materialized default QR code"
        );

        Ok(png)
    }

    /// Returns the session's URL, or the default URL when nothing is stored.
    ///
    /// Read-only: an empty session stays empty.
    pub async fn current_url(&self, session: &SessionHandle) -> Result<ValidatedUrl, AppError> {
        Ok(session
            .url()
            .await?
            .unwrap_or_else(|| self.default_url.clone()))
    }
}
