use crate::AppState;
use crate::api::error::AppError;
use crate::models::OutputFormat;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

#[utoipa::path(
    get,
    path = "/download/{filename}",
    params(
        ("filename" = String, Path, description = "Name returned by /generate or /wifi")
    ),
    responses(
        (status = 200, description = "Stored image as an attachment"),
        (status = 404, description = "File not found", body = super::qr::ErrorResponse)
    ),
    tag = "qr"
)]
pub async fn download_qr(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.qr.fetch(&filename).await?;
    let (content_type, content_disposition) = resolve_file_headers(&filename);

    tracing::info!("📎 Download {} ({} bytes)", filename, bytes.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_DISPOSITION, content_disposition)
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))
}

/// Content type from the extension, plus an attachment disposition with an
/// ASCII fallback name and the RFC 5987 encoded original.
pub(crate) fn resolve_file_headers(filename: &str) -> (String, String) {
    let extension = filename.rsplit('.').next().unwrap_or("");
    let content_type = match OutputFormat::parse(extension) {
        Some(format) => format.mime_type().to_string(),
        None => mime::APPLICATION_OCTET_STREAM.to_string(),
    };

    let ascii_filename = filename
        .chars()
        .filter(|c| c.is_ascii() && !c.is_control() && *c != '"' && *c != '\\' && *c != ';')
        .collect::<String>();
    let fallback_filename = if ascii_filename.is_empty() {
        "qrcode"
    } else {
        &ascii_filename
    };

    let encoded_filename = utf8_percent_encode(filename, NON_ALPHANUMERIC).to_string();

    (
        content_type,
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback_filename, encoded_filename
        ),
    )
}
