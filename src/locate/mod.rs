//! Image Locator
//!
//! Finds the image reference behind a context-menu interaction. Three
//! triggers exist, matching where the plugin hooks into the host:
//!
//! - a right-click on rendered content (reading view / live preview)
//! - the editor context menu, keyed on the cursor line
//! - the file menu of a vault attachment
//!
//! All lookups are pure and return `None` when nothing matches; the caller
//! then simply skips adding a menu entry.

mod dom;
mod markdown;

use std::path::Path;

use serde::Deserialize;

pub use dom::{first_image_src, locate_in_element, PointerTarget};
pub use markdown::locate_in_line;

/// Attachment extensions offered for OCR
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Vault path of an image attachment, `None` for other files
pub fn locate_attachment(path: &str) -> Option<String> {
    let extension = Path::new(path).extension()?.to_str()?.to_lowercase();
    IMAGE_EXTENSIONS
        .contains(&extension.as_str())
        .then(|| path.to_string())
}

/// A context-menu interaction reported by the plugin
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MenuTrigger {
    /// Right-click on rendered content
    #[serde(rename_all = "camelCase")]
    Element {
        #[serde(flatten)]
        target: PointerTarget,
    },
    /// Editor context menu
    #[serde(rename_all = "camelCase")]
    Line {
        line: String,
        #[serde(default)]
        live_preview_html: Option<String>,
    },
    /// File menu on a vault file
    Attachment { path: String },
}

impl MenuTrigger {
    pub fn locate(&self) -> Option<String> {
        match self {
            Self::Element { target } => locate_in_element(target),
            Self::Line {
                line,
                live_preview_html,
            } => locate_in_line(line, live_preview_html.as_deref()),
            Self::Attachment { path } => locate_attachment(path),
        }
    }
}
