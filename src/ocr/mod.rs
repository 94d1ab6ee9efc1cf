//! OCR Module
//!
//! Sends images to a cloud OCR provider and normalizes the answer into an
//! [`OcrResult`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use image_ocr_server::ocr::OcrClient;
//! use image_ocr_server::resolve::resolve_image_path;
//!
//! let client = OcrClient::default();
//! let image = resolve_image_path("/vault", "images/photo.png");
//! let result = client.recognize_image(&image, &service).await;
//! if result.success {
//!     println!("{}", result.text);
//! }
//! ```

mod aliyun;
mod client;
mod provider;
#[cfg(test)]
pub(crate) mod test_support;
mod types;

pub use aliyun::{AliyunProvider, DEFAULT_ENDPOINT};
pub use client::{extract_content, recognize_with, OcrClient};
pub use provider::{OcrProvider, ProviderResponse};
pub use types::{OcrError, OcrResult, EXTRACTION_FAILED, INVALID_CONFIGURATION};
