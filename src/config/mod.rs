use std::env;
use std::path::PathBuf;

/// Runtime configuration for the QR service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface to bind (default: "127.0.0.1")
    pub host: String,

    /// Port to listen on (default: 5000)
    pub port: u16,

    /// Flat directory generated images are written to (default: "static/qrcodes")
    pub storage_dir: PathBuf,

    /// Maximum accepted request body in bytes (default: 64 KB)
    pub max_body_size: usize,

    /// Largest rendered image side in pixels (default: 4096, about 48 MB of RGB)
    pub max_image_dimension: u32,

    /// Encodes allowed on the blocking pool at once (default: 4)
    pub max_concurrent_encodes: usize,

    /// JPEG encoder quality, 1-100 (default: 75)
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            storage_dir: PathBuf::from("static/qrcodes"),
            max_body_size: 64 * 1024, // 64 KB
            max_image_dimension: 4096,
            max_concurrent_encodes: 4,
            jpeg_quality: 75,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            host: env::var("HOST").unwrap_or(default.host),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),

            storage_dir: env::var("QR_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.storage_dir),

            max_body_size: env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_body_size),

            max_image_dimension: env::var("MAX_IMAGE_DIMENSION")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &u32| *v > 0)
                .unwrap_or(default.max_image_dimension),

            max_concurrent_encodes: env::var("MAX_CONCURRENT_ENCODES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &usize| *v > 0)
                .unwrap_or(default.max_concurrent_encodes),

            jpeg_quality: env::var("JPEG_QUALITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(|q: u8| q.clamp(1, 100))
                .unwrap_or(default.jpeg_quality),
        }
    }

    /// Config for local development and tests: temporary-friendly storage dir, same limits
    pub fn development() -> Self {
        Self {
            storage_dir: env::temp_dir().join("rust-qr-backend"),
            ..Self::default()
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
