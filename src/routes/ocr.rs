//! OCR routes
//!
//! The plugin calls `/menu` from its context-menu hooks and `/recognize`
//! when the user picks the entry. Every OCR outcome, failures included, is
//! a 200 response so the plugin can show it as a notice; only a blank
//! `image` is rejected with 400.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::locate::MenuTrigger;
use crate::menu::{menu_action, MenuAction};
use crate::ocr::OcrResult;
use crate::resolve::{resolve_image_path, ResolvedImage};
use crate::state::AppState;

/// Failure reported when no enabled service matches the default selection
const NO_ACTIVE_SERVICE: &str = "no enabled OCR service matches the default selection";

/// Create the OCR router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/menu", post(menu))
        .route("/recognize", post(recognize))
}

/// Located image and the menu entry to show for it
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub image: Option<String>,
    pub action: Option<MenuAction>,
}

/// Locate the image behind a menu trigger and pick the menu entry
async fn menu(State(state): State<AppState>, Json(trigger): Json<MenuTrigger>) -> Json<MenuResponse> {
    let image = trigger.locate();

    let action = match &image {
        Some(image) => {
            tracing::debug!("Menu trigger located image {}", image);
            Some(menu_action(image, &state.settings().await))
        }
        None => None,
    };

    Json(MenuResponse { image, action })
}

#[derive(Debug, Deserialize)]
pub struct RecognizeRequest {
    /// Image reference as located (URL or vault path)
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeResponse {
    #[serde(flatten)]
    pub result: OcrResult,
    pub image: String,
    pub resolved: ResolvedImage,
    pub service: Option<String>,
}

/// Resolve the image and run OCR with the active service
async fn recognize(
    State(state): State<AppState>,
    Json(request): Json<RecognizeRequest>,
) -> Result<Json<RecognizeResponse>> {
    if request.image.trim().is_empty() {
        return Err(AppError::BadRequest("image must not be empty".to_string()));
    }

    let resolved = resolve_image_path(&state.config().vault.root, &request.image);
    let settings = state.settings().await;

    let (result, service) = match settings.active_service() {
        Some(service) => {
            tracing::info!("OCR {} with {}", resolved.as_str(), service.kind);
            (
                state.ocr().recognize_image(&resolved, service).await,
                Some(service.kind.clone()),
            )
        }
        None => (OcrResult::failed(NO_ACTIVE_SERVICE), None),
    };

    Ok(Json(RecognizeResponse {
        result,
        image: request.image,
        resolved,
        service,
    }))
}
