//! OCR Types

use serde::Serialize;

/// Message for credentials that are missing or blank
pub const INVALID_CONFIGURATION: &str = "invalid service configuration";

/// Message for a provider response without recognized text
pub const EXTRACTION_FAILED: &str = "failed to extract text from response";

/// Outcome of one OCR invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OcrResult {
    pub success: bool,
    /// Recognized text, empty on failure
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OcrResult {
    pub fn recognized(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            error: Some(error.into()),
        }
    }
}

impl From<OcrError> for OcrResult {
    fn from(error: OcrError) -> Self {
        Self::failed(error.to_string())
    }
}

/// OCR error types
///
/// These never leave the OCR client; they are folded into [`OcrResult`].
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("{}", INVALID_CONFIGURATION)]
    InvalidConfiguration,

    #[error("unsupported OCR service type: {0}")]
    UnsupportedService(String),

    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid OCR endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("OCR provider returned {status}: {code}: {message}")]
    Provider {
        status: u16,
        code: String,
        message: String,
    },

    #[error("{}", EXTRACTION_FAILED)]
    Extraction,
}
