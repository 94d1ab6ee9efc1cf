//! Context-menu actions
//!
//! Given a located image, decide which single entry the plugin adds to the
//! host menu.

use serde::Serialize;

use crate::settings::OcrSettings;

/// Shown when no enabled service matches the default selection
pub const NOT_CONFIGURED_NOTICE: &str = "Configure an OCR service in the plugin settings first";

/// A menu entry for the plugin to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum MenuAction {
    /// Run OCR on the image with the active service
    #[serde(rename_all = "camelCase")]
    Recognize {
        title: String,
        icon: &'static str,
        image: String,
        service: String,
    },
    /// Open the plugin settings instead
    #[serde(rename_all = "camelCase")]
    OpenSettings {
        title: String,
        icon: &'static str,
        notice: &'static str,
    },
}

/// Build the menu entry for an image reference
pub fn menu_action(image: &str, settings: &OcrSettings) -> MenuAction {
    match settings.active_service() {
        Some(service) => MenuAction::Recognize {
            title: format!("OCR: recognize image text ({})", service.name),
            icon: "file-scan",
            image: image.to_string(),
            service: service.kind.clone(),
        },
        None => MenuAction::OpenSettings {
            title: "OCR service not configured".to_string(),
            icon: "alert-triangle",
            notice: NOT_CONFIGURED_NOTICE,
        },
    }
}
