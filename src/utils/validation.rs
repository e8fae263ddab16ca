use crate::models::{ErrorCorrection, GenerationRequest, OutputFormat, QrSettings, WifiRequest};
use crate::utils::color::parse_color;
use serde_json::{Map, Value};
use std::path::Path;

pub type Params = Map<String, Value>;

/// Highest QR symbol version
pub const MAX_VERSION: i64 = 40;

const DEFAULT_FILL_COLOR: &str = "#000000";
const DEFAULT_BACK_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Reads an optional string parameter. `null` counts as absent.
pub fn string_param<'a>(params: &'a Params, key: &str) -> Result<Option<&'a str>, ValidationError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ValidationError::new(
            "INVALID_TYPE",
            format!("'{}' must be a string", key),
        )),
    }
}

/// Reads an integer parameter, accepting JSON integers, integral floats and
/// integer strings. Anything unparseable is a caller error, never a silent default.
pub fn int_param(params: &Params, key: &str, default: i64) -> Result<i64, ValidationError> {
    let invalid = || {
        ValidationError::new(
            "INVALID_NUMBER",
            format!("'{}' must be an integer", key),
        )
    };

    match params.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(i)
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                    _ => Err(invalid()),
                }
            }
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

fn color_param(params: &Params, key: &str, default: &str) -> Result<image::Rgb<u8>, ValidationError> {
    let raw = string_param(params, key)?.unwrap_or(default);
    parse_color(raw).ok_or_else(|| {
        ValidationError::new("INVALID_COLOR", format!("Unknown color for '{}': {}", key, raw))
    })
}

/// Validates a `/generate` payload and applies defaults.
pub fn validate_generation(params: &Params) -> Result<GenerationRequest, ValidationError> {
    let text = string_param(params, "text")?.unwrap_or("").trim();
    if text.is_empty() {
        return Err(ValidationError::new("EMPTY_TEXT", "Please enter text or URL"));
    }

    let version = int_param(params, "version", 1)?;
    let box_size = int_param(params, "box_size", 10)?;
    let border = int_param(params, "border", 4)?;

    if !(1..=MAX_VERSION).contains(&version) {
        return Err(ValidationError::new(
            "INVALID_VERSION",
            format!("Invalid version (was {}, expected 1 to {})", version, MAX_VERSION),
        ));
    }
    let box_size = u32::try_from(box_size)
        .ok()
        .filter(|b| *b > 0)
        .ok_or_else(|| {
            ValidationError::new(
                "INVALID_BOX_SIZE",
                format!("Invalid box size (was {}, expected larger than 0)", box_size),
            )
        })?;
    let border = u32::try_from(border).map_err(|_| {
        ValidationError::new(
            "INVALID_BORDER",
            format!("Invalid border value (was {}, expected 0 or larger than that)", border),
        )
    })?;

    let fill_color = color_param(params, "fill_color", DEFAULT_FILL_COLOR)?;
    let back_color = color_param(params, "back_color", DEFAULT_BACK_COLOR)?;

    let format = match string_param(params, "format")? {
        None => OutputFormat::default(),
        Some(raw) => OutputFormat::parse(raw).ok_or_else(|| {
            ValidationError::new(
                "INVALID_FORMAT",
                format!("Unsupported format '{}', expected png or jpeg", raw),
            )
        })?,
    };

    // Lenient: anything that is not exactly L/M/Q/H becomes L
    let error_correction =
        ErrorCorrection::from_param(params.get("error_correction").and_then(Value::as_str));

    Ok(GenerationRequest {
        text: text.to_string(),
        settings: QrSettings {
            version: version as i16,
            error_correction,
            box_size,
            border,
            fill_color,
            back_color,
        },
        format,
    })
}

/// Extracts the `/wifi` fields. SSID emptiness is checked by the payload formatter.
pub fn parse_wifi(params: &Params) -> Result<WifiRequest, ValidationError> {
    let ssid = string_param(params, "ssid")?.unwrap_or("").trim();
    let password = string_param(params, "password")?.unwrap_or("").trim();
    let encryption = string_param(params, "encryption")?.unwrap_or(WifiRequest::DEFAULT_ENCRYPTION);

    Ok(WifiRequest {
        ssid: ssid.to_string(),
        password: password.to_string(),
        encryption: encryption.to_string(),
    })
}

/// Accepts only a bare file name inside the storage root.
pub fn sanitize_download_name(filename: &str) -> Result<&str, ValidationError> {
    let traversal = || {
        tracing::warn!("Path traversal attempt detected: {}", filename);
        ValidationError::new("INVALID_FILENAME", "Filename must be a plain file name")
    };

    if filename.is_empty() || filename.len() > 255 {
        return Err(ValidationError::new("INVALID_FILENAME", "Filename length out of range"));
    }

    if filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.starts_with('.')
        || filename.chars().any(|c| c.is_control() || c == ':')
    {
        return Err(traversal());
    }

    // Reject anything the platform would still split into components
    match Path::new(filename).file_name().and_then(|n| n.to_str()) {
        Some(name) if name == filename => Ok(filename),
        _ => Err(traversal()),
    }
}
