pub mod api;
pub mod config;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::qr_service::QrService;
use crate::services::storage::StorageService;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::qr::generate_qr,
        api::handlers::qr::generate_wifi_qr,
        api::handlers::download::download_qr,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::qr::GenerateRequestBody,
            api::handlers::qr::WifiRequestBody,
            api::handlers::qr::GenerateResponse,
            api::handlers::qr::WifiResponse,
            api::handlers::qr::ErrorResponse,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "qr", description = "QR code generation and download"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageService>,
    pub qr: Arc<QrService>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::index::index))
        .route("/health", get(api::handlers::health::health_check))
        .route("/generate", post(api::handlers::qr::generate_qr))
        .route("/wifi", post(api::handlers::qr::generate_wifi_qr))
        .route(
            "/download/:filename",
            get(api::handlers::download::download_qr),
        )
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(state.config.max_body_size))
        .with_state(state)
}
