use crate::AppState;
use crate::api::error::AppError;
use crate::utils::validation::Params;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;
use utoipa::ToSchema;

/// Documented shape of the `/generate` body. Handlers read the raw JSON
/// object so numeric fields may also arrive as strings.
#[derive(ToSchema)]
pub struct GenerateRequestBody {
    /// Payload to encode; required, trimmed
    pub text: String,
    /// Minimum symbol version, 1-40 (default 1)
    pub version: Option<i64>,
    /// Pixels per module (default 10)
    pub box_size: Option<i64>,
    /// Quiet zone in modules (default 4)
    pub border: Option<i64>,
    /// Default "#000000"
    pub fill_color: Option<String>,
    /// Default "#ffffff"
    pub back_color: Option<String>,
    /// "png" (default) or "jpeg"
    pub format: Option<String>,
    /// L (default), M, Q or H; unknown values use L
    pub error_correction: Option<String>,
}

#[derive(ToSchema)]
pub struct WifiRequestBody {
    pub ssid: String,
    pub password: Option<String>,
    /// Default "WPA"
    pub encryption: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    /// data:image/<format>;base64,...
    pub image: String,
    pub filename: String,
    pub download_url: String,
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct WifiResponse {
    pub success: bool,
    pub image: String,
    pub filename: String,
    pub download_url: String,
    pub wifi_text: String,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequestBody,
    responses(
        (status = 200, description = "QR code generated", body = GenerateResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Encoding or storage failure", body = ErrorResponse)
    ),
    tag = "qr"
)]
pub async fn generate_qr(
    State(state): State<AppState>,
    payload: Result<Json<Params>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(params) = payload?;
    let generated = state.qr.generate(&params).await?;

    Ok(Json(GenerateResponse {
        success: true,
        image: generated.image.data_uri(),
        download_url: generated.image.download_url(),
        filename: generated.image.filename,
        text: generated.request.text,
    }))
}

#[utoipa::path(
    post,
    path = "/wifi",
    request_body = WifiRequestBody,
    responses(
        (status = 200, description = "WiFi QR code generated", body = WifiResponse),
        (status = 400, description = "Missing SSID", body = ErrorResponse),
        (status = 500, description = "Encoding or storage failure", body = ErrorResponse)
    ),
    tag = "qr"
)]
pub async fn generate_wifi_qr(
    State(state): State<AppState>,
    payload: Result<Json<Params>, JsonRejection>,
) -> Result<Json<WifiResponse>, AppError> {
    let Json(params) = payload?;
    let generated = state.qr.generate_wifi(&params).await?;

    Ok(Json(WifiResponse {
        success: true,
        image: generated.image.data_uri(),
        download_url: generated.image.download_url(),
        filename: generated.image.filename,
        wifi_text: generated.wifi_text,
    }))
}
