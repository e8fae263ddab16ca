use crate::models::QrSettings;
use image::RgbImage;
use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Data too long for a version 40 QR code at error correction level {0:?}")]
    PayloadTooLarge(EcLevel),

    #[error("Invalid version (was {0}, expected 1 to 40)")]
    InvalidVersion(i16),

    #[error("Image too large ({side}px per side, maximum is {max}px)")]
    ImageTooLarge { side: u128, max: u32 },

    #[error("QR encoding failed: {0}")]
    Symbol(String),

    #[error("Image encoding failed: {0}")]
    Codec(String),
}

fn symbol_error(err: QrError, ec: EcLevel) -> EncodeError {
    match err {
        QrError::DataTooLong => EncodeError::PayloadTooLarge(ec),
        other => EncodeError::Symbol(other.to_string()),
    }
}

/// Encodes payloads into QR symbols and rasterizes them.
#[derive(Debug, Clone)]
pub struct QrEncoder {
    max_image_dimension: u32,
}

impl QrEncoder {
    pub fn new(max_image_dimension: u32) -> Self {
        Self {
            max_image_dimension,
        }
    }

    /// Builds the symbol. `settings.version` is a minimum: when the payload
    /// does not fit, the smallest larger version that holds it is used.
    pub fn encode_symbol(&self, payload: &str, settings: &QrSettings) -> Result<QrCode, EncodeError> {
        if !(1..=40).contains(&settings.version) {
            return Err(EncodeError::InvalidVersion(settings.version));
        }

        let ec = settings.error_correction.ec_level();
        let fitted = QrCode::with_error_correction_level(payload.as_bytes(), ec)
            .map_err(|e| symbol_error(e, ec))?;

        match fitted.version() {
            Version::Normal(v) if v < settings.version => {
                QrCode::with_version(payload.as_bytes(), Version::Normal(settings.version), ec)
                    .map_err(|e| symbol_error(e, ec))
            }
            _ => Ok(fitted),
        }
    }

    /// Draws `box_size` x `box_size` pixel modules inside a `border`-module quiet zone.
    pub fn rasterize(&self, code: &QrCode, settings: &QrSettings) -> Result<RgbImage, EncodeError> {
        // u128 holds the product for any u32 border and box size
        let modules = code.width() as u128;
        let box_size = settings.box_size as u128;
        let border = settings.border as u128;

        let side = (modules + 2 * border) * box_size;
        if side > self.max_image_dimension as u128 {
            return Err(EncodeError::ImageTooLarge {
                side,
                max: self.max_image_dimension,
            });
        }

        // Bounded by max_image_dimension from here on, so u32 arithmetic cannot wrap
        let side = side as u32;
        let box_size = settings.box_size;
        let offset = settings.border * box_size;
        let width = code.width();
        let mut img = RgbImage::from_pixel(side, side, settings.back_color);

        for (i, color) in code.to_colors().iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x0 = offset + (i % width) as u32 * box_size;
            let y0 = offset + (i / width) as u32 * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    img.put_pixel(x0 + dx, y0 + dy, settings.fill_color);
                }
            }
        }

        Ok(img)
    }

    pub fn encode(&self, payload: &str, settings: &QrSettings) -> Result<RgbImage, EncodeError> {
        let code = self.encode_symbol(payload, settings)?;
        tracing::debug!(
            "Encoded {} byte payload as {:?} ({} modules)",
            payload.len(),
            code.version(),
            code.width()
        );
        self.rasterize(&code, settings)
    }
}
