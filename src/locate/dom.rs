//! Image lookup in rendered HTML fragments
//!
//! Uses lol_html to stream through the markup the plugin captured from the
//! DOM and pick the first `<img>` carrying a `src`.

use lol_html::{element, rewrite_str, RewriteStrSettings};
use serde::Deserialize;

/// The element under the pointer, as outer HTML
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerTarget {
    /// Outer HTML of the event target
    pub html: String,
    /// Outer HTML of the target's parent element
    #[serde(default)]
    pub parent_html: Option<String>,
}

/// First non-empty `img` source in document order, entity-decoded
pub fn first_image_src(html: &str) -> Option<String> {
    let mut found: Option<String> = None;

    let result = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("img[src]", |el| {
                if found.is_none() {
                    found = el
                        .get_attribute("src")
                        .filter(|src| !src.trim().is_empty())
                        .map(|src| html_escape::decode_html_entities(&src).into_owned());
                }
                Ok(())
            })],
            ..RewriteStrSettings::default()
        },
    );

    if let Err(e) = result {
        tracing::debug!("Failed to scan HTML fragment for images: {}", e);
    }

    found
}

/// Locate the image implicated by a pointer event.
///
/// The target itself or one of its descendants wins; otherwise the parent
/// (which covers the parent being an image, or a sibling image).
pub fn locate_in_element(target: &PointerTarget) -> Option<String> {
    first_image_src(&target.html).or_else(|| {
        target
            .parent_html
            .as_deref()
            .and_then(first_image_src)
    })
}
