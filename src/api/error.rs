use crate::services::qr_encoder::EncodeError;
use crate::utils::validation::ValidationError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub const FILE_NOT_FOUND: &str = "File not found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Encoding(String),

    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),

    #[error("File not found")]
    NotFound,

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_)
            | AppError::Encoding(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidInput(err.message)
    }
}

impl From<EncodeError> for AppError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::PayloadTooLarge(_) => AppError::PayloadTooLarge(err.to_string()),
            EncodeError::ImageTooLarge { .. } => AppError::InvalidInput(err.to_string()),
            EncodeError::InvalidVersion(_) | EncodeError::Symbol(_) | EncodeError::Codec(_) => {
                AppError::Encoding(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 500-class messages are passed through to the caller verbatim
        let message = match &self {
            AppError::NotFound => FILE_NOT_FOUND.to_string(),
            AppError::InvalidInput(msg) => {
                tracing::debug!("Rejected request: {}", msg);
                msg.clone()
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                self.to_string()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                other.to_string()
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
