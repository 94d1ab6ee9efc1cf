//! OCR Providers
//!
//! Defines the provider trait. A provider knows how to reach one cloud OCR
//! API; it returns the raw response envelope and leaves text extraction to
//! the client.

use async_trait::async_trait;
use serde_json::Value;

use super::types::OcrError;

/// Raw provider response
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Decoded JSON body
    pub body: Value,
}

/// OCR provider trait
#[async_trait]
pub trait OcrProvider: Send + Sync {
    /// Provider key, matching `OcrServiceConfig::kind`
    fn kind(&self) -> &'static str;

    /// Let the provider fetch the image itself
    async fn recognize_from_url(&self, url: &str) -> Result<ProviderResponse, OcrError>;

    /// Upload the image bytes
    async fn recognize_from_bytes(&self, image_data: Vec<u8>) -> Result<ProviderResponse, OcrError>;
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub body: Value,
}

#[cfg(test)]
#[async_trait]
impl OcrProvider for MockProvider {
    fn kind(&self) -> &'static str {
        "mock"
    }

    async fn recognize_from_url(&self, _url: &str) -> Result<ProviderResponse, OcrError> {
        Ok(ProviderResponse {
            body: self.body.clone(),
        })
    }

    async fn recognize_from_bytes(&self, _image_data: Vec<u8>) -> Result<ProviderResponse, OcrError> {
        Ok(ProviderResponse {
            body: self.body.clone(),
        })
    }
}
