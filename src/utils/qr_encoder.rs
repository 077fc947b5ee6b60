//! QR code rendering to PNG.
//!
//! Encodes a [`ValidatedUrl`] as a greyscale QR code at error-correction level M with a
//! four-module quiet zone, then serializes it as PNG. Output is deterministic for a given
//! URL and module size.

use image::{ImageFormat, Luma};
use qrcode::QrCode;
use std::io::Cursor;

use crate::domain::entities::ValidatedUrl;

/// Default edge length of one QR module, in pixels.
pub const DEFAULT_MODULE_SIZE: u32 = 10;

/// Width of the quiet zone around the symbol, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Errors that can occur while producing a QR image.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("QR symbol construction failed: {0}")]
    Symbol(String),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Renders URLs as PNG QR codes.
#[derive(Debug, Clone, Copy)]
pub struct QrEncoder {
    module_size: u32,
}

impl QrEncoder {
    /// Creates an encoder drawing each module as a `module_size` x `module_size` square.
    pub fn new(module_size: u32) -> Self {
        Self {
            module_size: module_size.max(1),
        }
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    /// Encodes `url` as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Symbol`] if the data does not fit in a QR symbol and
    /// [`EncodeError::Png`] if image serialization fails.
    pub fn encode(&self, url: &ValidatedUrl) -> Result<Vec<u8>, EncodeError> {
        let code =
            QrCode::new(url.as_str().as_bytes()).map_err(|e| EncodeError::Symbol(e.to_string()))?;

        let image = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_size, self.module_size)
            .quiet_zone(true)
            .build();

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        tracing::debug!(
            "Encoded QR code: {} modules, {}x{} px, {} bytes",
            code.width(),
            image.width(),
            image.height(),
            png.len()
        );

        Ok(png)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_SIZE)
    }
}
