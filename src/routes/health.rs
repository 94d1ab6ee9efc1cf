//! Health check endpoints
//!
//! Besides liveness, reports whether OCR can run right now so the plugin
//! can point the user at the settings tab early.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Type of the active OCR service, if any
    pub ocr_service: Option<String>,
    /// The active service has both credentials
    pub ocr_ready: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let settings = state.settings().await;
    let active = settings.active_service();

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ocr_service: active.map(|service| service.kind.clone()),
        ocr_ready: active.is_some_and(|service| service.has_credentials()),
    })
}
