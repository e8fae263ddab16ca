use crate::models::{OutputFormat, QrImageResult};
use crate::services::qr_encoder::EncodeError;
use base64::{Engine as _, engine::general_purpose};
use chrono::NaiveDateTime;
use image::{DynamicImage, ImageOutputFormat, RgbImage};
use std::io::Cursor;

/// Which endpoint produced the image; decides the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrKind {
    Text,
    Wifi,
}

impl QrKind {
    pub fn prefix(self) -> &'static str {
        match self {
            QrKind::Text => "qrcode",
            QrKind::Wifi => "wifi_qr",
        }
    }
}

/// `<prefix>_<YYYYMMDD_HHMMSS>.<ext>`. Second granularity, so two images of
/// the same kind and format created within one second share a name.
pub fn build_filename(kind: QrKind, format: OutputFormat, at: NaiveDateTime) -> String {
    format!(
        "{}_{}.{}",
        kind.prefix(),
        at.format("%Y%m%d_%H%M%S"),
        format.as_str()
    )
}

/// Serializes the raster with the requested codec.
pub fn encode_image(
    image: RgbImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let output = match format {
        OutputFormat::Png => ImageOutputFormat::Png,
        OutputFormat::Jpeg => ImageOutputFormat::Jpeg(jpeg_quality),
    };

    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut bytes), output)
        .map_err(|e| EncodeError::Codec(e.to_string()))?;
    Ok(bytes)
}

/// Encodes the image and derives everything returned to the caller.
/// Nothing is written here; persistence happens only once this succeeds.
pub fn build_result(
    image: RgbImage,
    format: OutputFormat,
    kind: QrKind,
    at: NaiveDateTime,
    jpeg_quality: u8,
) -> Result<QrImageResult, EncodeError> {
    let raw_bytes = encode_image(image, format, jpeg_quality)?;
    let base64 = general_purpose::STANDARD.encode(&raw_bytes);

    Ok(QrImageResult {
        raw_bytes,
        base64,
        filename: build_filename(kind, format, at),
        format,
    })
}
