use crate::api::error::AppError;
use crate::config::AppConfig;
use crate::models::{GenerationRequest, OutputFormat, QrImageResult, QrSettings};
use crate::services::clock::Clock;
use crate::services::image_builder::{QrKind, build_result};
use crate::services::qr_encoder::QrEncoder;
use crate::services::storage::StorageService;
use crate::services::wifi::format_wifi_payload;
use crate::utils::validation::{Params, parse_wifi, sanitize_download_name, validate_generation};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct GeneratedQr {
    pub request: GenerationRequest,
    pub image: QrImageResult,
}

#[derive(Debug)]
pub struct GeneratedWifiQr {
    pub wifi_text: String,
    pub image: QrImageResult,
}

/// Request pipeline: validate, encode, serialize, persist.
pub struct QrService {
    storage: Arc<dyn StorageService>,
    clock: Arc<dyn Clock>,
    encoder: QrEncoder,
    jpeg_quality: u8,
    /// Bounds how many rasters are held in memory at once
    encode_permits: Arc<Semaphore>,
}

impl QrService {
    pub fn new(storage: Arc<dyn StorageService>, clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        Self {
            storage,
            clock,
            encoder: QrEncoder::new(config.max_image_dimension),
            jpeg_quality: config.jpeg_quality,
            encode_permits: Arc::new(Semaphore::new(config.max_concurrent_encodes.max(1))),
        }
    }

    pub async fn generate(&self, params: &Params) -> Result<GeneratedQr, AppError> {
        let request = validate_generation(params)?;
        debug!(
            "Validated generate request: {} chars, {:?}, format={}",
            request.text.chars().count(),
            request.settings.error_correction,
            request.format
        );

        let image = self
            .render_and_store(
                request.text.clone(),
                request.settings,
                request.format,
                QrKind::Text,
            )
            .await?;

        Ok(GeneratedQr { request, image })
    }

    pub async fn generate_wifi(&self, params: &Params) -> Result<GeneratedWifiQr, AppError> {
        let wifi = parse_wifi(params)?;
        let wifi_text = format_wifi_payload(&wifi)?;
        debug!("Formatted WiFi payload for SSID '{}'", wifi.ssid);

        let image = self
            .render_and_store(
                wifi_text.clone(),
                QrSettings::default(),
                OutputFormat::Png,
                QrKind::Wifi,
            )
            .await?;

        Ok(GeneratedWifiQr { wifi_text, image })
    }

    /// Looks up a stored image. Every failure, including storage errors,
    /// is reported as `NotFound`.
    pub async fn fetch(&self, filename: &str) -> Result<Vec<u8>, AppError> {
        let name = sanitize_download_name(filename).map_err(|_| AppError::NotFound)?;

        self.storage.get(name).await.map_err(|e| {
            debug!("Download of {} failed: {:#}", name, e);
            AppError::NotFound
        })
    }

    async fn render_and_store(
        &self,
        payload: String,
        settings: QrSettings,
        format: OutputFormat,
        kind: QrKind,
    ) -> Result<QrImageResult, AppError> {
        let encoder = self.encoder.clone();
        let jpeg_quality = self.jpeg_quality;
        let at = self.clock.now();

        let permit = self
            .encode_permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Encoder unavailable: {}", e)))?;

        // Symbol encoding and the codec are CPU bound
        let result = tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let image = encoder.encode(&payload, &settings)?;
            build_result(image, format, kind, at, jpeg_quality)
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Encoding task failed: {}", e)))??;

        if self.storage.exists(&result.filename).await.unwrap_or(false) {
            warn!("Overwriting existing file {}", result.filename);
        }

        self.storage
            .put(&result.filename, &result.raw_bytes)
            .await
            .map_err(AppError::Storage)?;

        info!(
            "💾 Stored {} ({} bytes)",
            result.filename,
            result.raw_bytes.len()
        );

        Ok(result)
    }
}
