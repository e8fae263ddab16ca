#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose};
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use rust_qr_backend::config::AppConfig;
use rust_qr_backend::services::clock::{Clock, FixedClock};
use rust_qr_backend::services::qr_service::QrService;
use rust_qr_backend::services::storage::StorageService;
use rust_qr_backend::{AppState, create_app};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// In-memory storage; `failing()` makes every write fail like a full disk.
pub struct MockStorageService {
    files: Mutex<HashMap<String, Vec<u8>>>,
    fail_writes: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            fail_writes: true,
        }
    }

    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn stored(&self, filename: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(filename).cloned()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn put(&self, filename: &str, data: &[u8]) -> anyhow::Result<()> {
        if self.fail_writes {
            return Err(anyhow::anyhow!("No space left on device"));
        }
        self.files
            .lock()
            .unwrap()
            .insert(filename.to_string(), data.to_vec());
        Ok(())
    }

    async fn get(&self, filename: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(filename)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("Key not found"))
    }

    async fn exists(&self, filename: &str) -> anyhow::Result<bool> {
        Ok(self.files.lock().unwrap().contains_key(filename))
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .and_then(|d| d.and_hms_opt(14, 3, 9))
        .unwrap()
}

pub fn setup_app_with(storage: Arc<dyn StorageService>, clock: Arc<dyn Clock>) -> Router {
    let config = AppConfig::development();
    let qr = Arc::new(QrService::new(storage.clone(), clock, &config));
    create_app(AppState {
        storage,
        qr,
        config,
    })
}

/// Router over an in-memory store with the clock frozen at `fixed_time()`.
pub fn setup_app() -> (Router, Arc<MockStorageService>) {
    let storage = Arc::new(MockStorageService::new());
    let app = setup_app_with(storage.clone(), Arc::new(FixedClock(fixed_time())));
    (app, storage)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await;

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Splits `data:image/<fmt>;base64,<payload>` into the subtype and decoded bytes.
pub fn decode_data_uri(uri: &str) -> (String, Vec<u8>) {
    let rest = uri.strip_prefix("data:image/").expect("data URI prefix");
    let (format, payload) = rest.split_once(";base64,").expect("base64 marker");
    let bytes = general_purpose::STANDARD.decode(payload).unwrap();
    (format.to_string(), bytes)
}

/// Runs an independent QR decoder over an encoded PNG/JPEG.
pub fn decode_qr(bytes: &[u8]) -> String {
    let img = image::load_from_memory(bytes).unwrap().to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        img.width() as usize,
        img.height() as usize,
        |x, y| img.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
    let (_meta, content) = grids[0].decode().unwrap();
    content
}
