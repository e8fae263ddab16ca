mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn test_wifi_payload_and_image() {
    let (app, storage) = setup_app();

    let (status, body) = post_json(
        &app,
        "/wifi",
        json!({"ssid": "MyNet", "password": "secret123", "encryption": "WPA"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["wifi_text"], "WIFI:T:WPA;S:MyNet;P:secret123;;");
    assert_eq!(body["filename"], "wifi_qr_20240517_140309.png");
    assert_eq!(body["download_url"], "/download/wifi_qr_20240517_140309.png");

    let (format, bytes) = decode_data_uri(body["image"].as_str().unwrap());
    assert_eq!(format, "png");
    assert_eq!(decode_qr(&bytes), "WIFI:T:WPA;S:MyNet;P:secret123;;");
    assert_eq!(storage.stored("wifi_qr_20240517_140309.png"), Some(bytes));
}

#[tokio::test]
async fn test_wifi_defaults() {
    let (app, _storage) = setup_app();

    let (status, body) = post_json(&app, "/wifi", json!({"ssid": "  Open  "})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wifi_text"], "WIFI:T:WPA;S:Open;P:;;");
}

#[tokio::test]
async fn test_wifi_empty_ssid_is_rejected_without_writing() {
    let (app, storage) = setup_app();

    for body in [
        json!({"ssid": "", "password": "x"}),
        json!({"ssid": "   "}),
        json!({"password": "only"}),
    ] {
        let (status, body) = post_json(&app, "/wifi", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please enter WiFi SSID");
    }
    assert_eq!(storage.len(), 0);
}

#[tokio::test]
async fn test_wifi_fields_are_not_escaped() {
    let (app, _storage) = setup_app();

    // The WiFi QR convention escapes `;` `:` and `\`; this service inserts them raw
    let (status, body) = post_json(
        &app,
        "/wifi",
        json!({"ssid": "Net;work", "password": "pa:ss", "encryption": "WEP"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wifi_text"], "WIFI:T:WEP;S:Net;work;P:pa:ss;;");

    let (_, bytes) = decode_data_uri(body["image"].as_str().unwrap());
    assert_eq!(decode_qr(&bytes), "WIFI:T:WEP;S:Net;work;P:pa:ss;;");
}

#[tokio::test]
async fn test_wifi_and_text_do_not_collide() {
    let (app, storage) = setup_app();

    let (_, text) = post_json(&app, "/generate", json!({"text": "hello"})).await;
    let (_, wifi) = post_json(&app, "/wifi", json!({"ssid": "MyNet"})).await;

    assert_ne!(text["filename"], wifi["filename"]);
    assert_eq!(storage.len(), 2);
}
