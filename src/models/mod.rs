use image::Rgb;
use qrcode::EcLevel;
use serde::Serialize;
use std::fmt;

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// QR error correction level.
///
/// Request values are matched exactly ("L", "M", "Q", "H"); anything else,
/// including lowercase spellings and non-string values, resolves to `L`.
/// This lenient fallback is intentional and covered by tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ErrorCorrection {
    #[default]
    L,
    M,
    Q,
    H,
}

impl ErrorCorrection {
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("L") => ErrorCorrection::L,
            Some("M") => ErrorCorrection::M,
            Some("Q") => ErrorCorrection::Q,
            Some("H") => ErrorCorrection::H,
            _ => ErrorCorrection::default(),
        }
    }

    pub fn ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

/// Output image codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Accepts `png`, `jpeg` and `jpg` in any case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpeg" | "jpg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }

    /// Used both as the file extension and as the data-URI subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime_type(self) -> mime::Mime {
        match self {
            OutputFormat::Png => mime::IMAGE_PNG,
            OutputFormat::Jpeg => mime::IMAGE_JPEG,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Symbol and raster parameters handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrSettings {
    /// Minimum symbol version; the encoder grows it to fit the payload.
    pub version: i16,
    pub error_correction: ErrorCorrection,
    /// Pixels per module.
    pub box_size: u32,
    /// Quiet zone width in modules.
    pub border: u32,
    pub fill_color: Rgb<u8>,
    pub back_color: Rgb<u8>,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            version: 1,
            error_correction: ErrorCorrection::L,
            box_size: 10,
            border: 4,
            fill_color: BLACK,
            back_color: WHITE,
        }
    }
}

/// A validated `/generate` request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub text: String,
    pub settings: QrSettings,
    pub format: OutputFormat,
}

/// A validated `/wifi` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiRequest {
    pub ssid: String,
    pub password: String,
    pub encryption: String,
}

impl WifiRequest {
    pub const DEFAULT_ENCRYPTION: &'static str = "WPA";
}

/// Encoded image ready to be returned and persisted.
#[derive(Debug, Clone)]
pub struct QrImageResult {
    pub raw_bytes: Vec<u8>,
    pub base64: String,
    pub filename: String,
    pub format: OutputFormat,
}

impl QrImageResult {
    pub fn data_uri(&self) -> String {
        format!("data:image/{};base64,{}", self.format, self.base64)
    }

    pub fn download_url(&self) -> String {
        format!("/download/{}", self.filename)
    }
}
