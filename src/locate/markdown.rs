//! Image lookup on an editor line

use once_cell::sync::Lazy;
use regex::Regex;

use super::dom::first_image_src;

static IMAGE_EMBED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[.*?\]\((.*?)\)").expect("image embed pattern"));

/// Target of the first `![alt](target)` on the line.
///
/// `Some(None)` means the line embeds an image but its target is empty.
fn first_embed_target(line: &str) -> Option<Option<String>> {
    let captures = IMAGE_EMBED.captures(line)?;
    let target = captures
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    Some(target)
}

/// Locate the image implicated by the cursor line.
///
/// Falls back to the first image mounted in the live-preview surface when
/// the line has no markdown embed. That fallback ignores the cursor
/// position entirely.
pub fn locate_in_line(line: &str, live_preview_html: Option<&str>) -> Option<String> {
    match first_embed_target(line) {
        Some(target) => target,
        None => {
            let found = live_preview_html.and_then(first_image_src);
            if let Some(src) = &found {
                tracing::debug!("No embed on cursor line, using live preview image {}", src);
            }
            found
        }
    }
}
