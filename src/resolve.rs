//! Image path resolution
//!
//! Turns a located image reference into something the OCR client can use:
//! remote URLs pass through, vault-relative paths are joined onto the vault
//! root. Nothing here touches the filesystem; a path that does not exist
//! only fails when the OCR client reads it.

use serde::Serialize;

/// A resolved image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum ResolvedImage {
    /// HTTP(S) URL fetched by the provider
    Remote(String),
    /// Absolute local path read by the OCR client
    Local(String),
}

impl ResolvedImage {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Remote(url) => url,
            Self::Local(path) => path,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

/// Resolve an image reference against the vault root.
///
/// Trailing slashes on the root are ignored, so a vault at `/` yields
/// `/images/a.png` rather than `//images/a.png`.
pub fn resolve_image_path(vault_root: &str, image_path: &str) -> ResolvedImage {
    if image_path.starts_with("http") {
        return ResolvedImage::Remote(image_path.to_string());
    }

    let root = vault_root.trim_end_matches('/');
    let relative = image_path.strip_prefix('/').unwrap_or(image_path);
    ResolvedImage::Local(format!("{}/{}", root, relative))
}
