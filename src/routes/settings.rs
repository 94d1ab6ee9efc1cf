//! Settings routes
//!
//! Backing API for the plugin's settings tab. Every edit is persisted
//! before it is returned. Responses carry [`SettingsView`], which never
//! includes secret keys.

use axum::{
    extract::{Path, State},
    routing::{get, patch, put},
    Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::settings::{OcrSettings, ServiceUpdate, ServiceView, SettingsView};
use crate::state::AppState;

/// Create the settings router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(replace_settings))
        .route("/default", put(set_default_service))
        .route("/services", get(enabled_services))
        .route("/services/:kind", patch(update_service))
}

async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(SettingsView::from(&state.settings().await))
}

async fn replace_settings(
    State(state): State<AppState>,
    Json(mut settings): Json<OcrSettings>,
) -> Result<Json<SettingsView>> {
    let updated = state
        .update_settings(move |current| {
            settings.keep_secrets_from(current);
            *current = settings;
            Ok(())
        })
        .await?;

    Ok(Json(SettingsView::from(&updated)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultServiceRequest {
    pub default_service: String,
}

async fn set_default_service(
    State(state): State<AppState>,
    Json(request): Json<DefaultServiceRequest>,
) -> Result<Json<SettingsView>> {
    let updated = state
        .update_settings(|settings| {
            let selectable = settings
                .enabled_services()
                .iter()
                .any(|s| s.kind == request.default_service);
            if !selectable {
                return Err(AppError::BadRequest(format!(
                    "No enabled service of type {}",
                    request.default_service
                )));
            }
            settings.default_service = request.default_service;
            Ok(())
        })
        .await?;

    Ok(Json(SettingsView::from(&updated)))
}

async fn enabled_services(State(state): State<AppState>) -> Json<Vec<ServiceView>> {
    let settings = state.settings().await;
    Json(
        settings
            .enabled_services()
            .into_iter()
            .map(ServiceView::from)
            .collect(),
    )
}

async fn update_service(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(update): Json<ServiceUpdate>,
) -> Result<Json<SettingsView>> {
    let updated = state
        .update_settings(|settings| {
            let service = settings
                .service_mut(&kind)
                .ok_or_else(|| AppError::NotFound(format!("OCR service {}", kind)))?;
            update.apply(service);
            Ok(())
        })
        .await?;

    tracing::info!("Updated OCR service {}", kind);
    Ok(Json(SettingsView::from(&updated)))
}
