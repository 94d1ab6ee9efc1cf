//! HTTP-level tests for the plugin-facing API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::Query,
    http::{header, HeaderValue},
    routing::post,
    Json, Router,
};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use image_ocr_server::config::Config;
use image_ocr_server::settings::{JsonFileStore, MemoryStore, OcrSettings, SettingsStore};
use image_ocr_server::state::AppState;

/// Minimal OCR endpoint echoing what it was asked to read
async fn spawn_ocr_stub() -> String {
    async fn recognize(Query(query): Query<HashMap<String, String>>, body: Bytes) -> Json<Value> {
        let content = match query.get("Url") {
            Some(url) => format!("url:{}", url),
            None => format!("bytes:{}", String::from_utf8_lossy(&body)),
        };
        Json(json!({"RequestId": "stub", "Data": json!({"content": content}).to_string()}))
    }

    let app = Router::new().route("/", post(recognize));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn configured_settings() -> OcrSettings {
    let mut settings = OcrSettings::default();
    settings.services[0].access_key = "ak".to_string();
    settings.services[0].secret_key = "sk".to_string();
    settings
}

async fn server_with(vault: &TempDir, endpoint: &str, store: Arc<dyn SettingsStore>) -> TestServer {
    let mut config = Config::default();
    config.vault.root = vault.path().to_string_lossy().into_owned();
    config.ocr.endpoint = endpoint.to_string();

    let state = AppState::new(config, store).await.unwrap();
    TestServer::new(image_ocr_server::app(state)).unwrap()
}

#[tokio::test]
async fn test_health() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server.get("/api/v1/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["ocrService"], "aliyun");
    assert_eq!(body["ocrReady"], false);
}

#[tokio::test]
async fn test_cors_only_answers_obsidian() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(
        &vault,
        "http://127.0.0.1:1",
        Arc::new(MemoryStore::with_settings(configured_settings())),
    )
    .await;

    let foreign = server
        .get("/api/v1/settings")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://evil.example"))
        .await;
    assert!(foreign
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());

    let obsidian = server
        .get("/api/v1/settings")
        .add_header(header::ORIGIN, HeaderValue::from_static("app://obsidian.md"))
        .await;
    assert_eq!(
        obsidian.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("app://obsidian.md"))
    );
}

#[tokio::test]
async fn test_settings_never_return_secret_key() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(
        &vault,
        "http://127.0.0.1:1",
        Arc::new(MemoryStore::with_settings(configured_settings())),
    )
    .await;

    let settings = server.get("/api/v1/settings").await;
    let body = settings.json::<Value>();
    assert_eq!(body["services"][0]["accessKey"], "ak");
    assert_eq!(body["services"][0]["hasSecretKey"], true);
    assert!(body["services"][0].get("secretKey").is_none());

    let services = server.get("/api/v1/settings/services").await.json::<Value>();
    assert!(services[0].get("secretKey").is_none());

    // Sending the view back must not wipe the stored secret
    let mut resubmitted = body.clone();
    resubmitted["services"][0]["enabled"] = json!(true);
    server
        .put("/api/v1/settings")
        .json(&resubmitted)
        .await
        .assert_status_ok();
    let health = server.get("/health").await.json::<Value>();
    assert_eq!(health["ocrReady"], true);
}

#[tokio::test]
async fn test_recognize_rejects_blank_image() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .post("/api/v1/ocr/recognize")
        .json(&json!({"image": "  "}))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_menu_for_rendered_image() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .post("/api/v1/ocr/menu")
        .json(&json!({
            "kind": "element",
            "html": "<div class=\"image-embed\"><img src=\"images/photo.png\"></div>"
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["image"], "images/photo.png");
    assert_eq!(body["action"]["action"], "recognize");
    assert_eq!(body["action"]["image"], "images/photo.png");
}

#[tokio::test]
async fn test_menu_without_image() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .post("/api/v1/ocr/menu")
        .json(&json!({"kind": "line", "line": "plain text"}))
        .await;

    let body = response.json::<Value>();
    assert!(body["image"].is_null());
    assert!(body["action"].is_null());
}

#[tokio::test]
async fn test_menu_opens_settings_without_service() {
    let vault = tempfile::tempdir().unwrap();
    let mut settings = OcrSettings::default();
    settings.services[0].enabled = false;
    let server = server_with(
        &vault,
        "http://127.0.0.1:1",
        Arc::new(MemoryStore::with_settings(settings)),
    )
    .await;

    let response = server
        .post("/api/v1/ocr/menu")
        .json(&json!({"kind": "attachment", "path": "assets/scan.jpg"}))
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["image"], "assets/scan.jpg");
    assert_eq!(body["action"]["action"], "openSettings");
}

#[tokio::test]
async fn test_recognize_without_credentials() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .post("/api/v1/ocr/recognize")
        .json(&json!({"image": "/images/photo.png"}))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], false);
    assert_eq!(body["text"], "");
    assert_eq!(body["error"], "invalid service configuration");
    assert_eq!(
        body["resolved"]["path"],
        format!("{}/images/photo.png", vault.path().display())
    );
}

#[tokio::test]
async fn test_recognize_remote_image() {
    let vault = tempfile::tempdir().unwrap();
    let endpoint = spawn_ocr_stub().await;
    let server = server_with(
        &vault,
        &endpoint,
        Arc::new(MemoryStore::with_settings(configured_settings())),
    )
    .await;

    let response = server
        .post("/api/v1/ocr/recognize")
        .json(&json!({"image": "https://example.com/a.png"}))
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "url:https://example.com/a.png");
    assert_eq!(body["resolved"]["kind"], "remote");
    assert_eq!(body["service"], "aliyun");
}

#[tokio::test]
async fn test_recognize_vault_image() {
    let vault = tempfile::tempdir().unwrap();
    tokio::fs::create_dir_all(vault.path().join("images")).await.unwrap();
    tokio::fs::write(vault.path().join("images/photo.png"), "RECEIPT 42")
        .await
        .unwrap();

    let endpoint = spawn_ocr_stub().await;
    let server = server_with(
        &vault,
        &endpoint,
        Arc::new(MemoryStore::with_settings(configured_settings())),
    )
    .await;

    let response = server
        .post("/api/v1/ocr/recognize")
        .json(&json!({"image": "/images/photo.png"}))
        .await;

    let body = response.json::<Value>();
    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "bytes:RECEIPT 42");
}

#[tokio::test]
async fn test_create_note() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .post("/api/v1/notes")
        .json(&json!({"image": "images/photo.png", "text": "ABC"}))
        .await;

    assert_eq!(response.status_code(), 201);
    let path = response.json::<Value>()["path"].as_str().unwrap().to_string();
    let content = tokio::fs::read_to_string(vault.path().join(&path)).await.unwrap();
    assert!(content.starts_with("# OCR result: photo.png"));
}

#[tokio::test]
async fn test_settings_edits_are_persisted() {
    let vault = tempfile::tempdir().unwrap();
    let settings_path = vault.path().join("data.json");
    let server = server_with(
        &vault,
        "http://127.0.0.1:1",
        Arc::new(JsonFileStore::new(&settings_path)),
    )
    .await;

    let response = server
        .patch("/api/v1/settings/services/aliyun")
        .json(&json!({"accessKey": "ak", "secretKey": "sk"}))
        .await;
    response.assert_status_ok();

    let stored = JsonFileStore::new(&settings_path).load().await.unwrap();
    assert_eq!(stored.services[0].access_key, "ak");
    assert_eq!(stored.services[0].secret_key, "sk");

    let current = server.get("/api/v1/settings").await.json::<Value>();
    assert_eq!(current["services"][0]["accessKey"], "ak");
    assert_eq!(current["services"][0]["hasSecretKey"], true);
}

#[tokio::test]
async fn test_settings_rejects_unknown_services() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    let response = server
        .patch("/api/v1/settings/services/baidu")
        .json(&json!({"enabled": true}))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = server
        .put("/api/v1/settings/default")
        .json(&json!({"defaultService": "baidu"}))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_disabling_service_hides_it() {
    let vault = tempfile::tempdir().unwrap();
    let server = server_with(&vault, "http://127.0.0.1:1", Arc::new(MemoryStore::new())).await;

    server
        .patch("/api/v1/settings/services/aliyun")
        .json(&json!({"enabled": false}))
        .await
        .assert_status_ok();

    let services = server.get("/api/v1/settings/services").await.json::<Value>();
    assert_eq!(services, json!([]));
}
