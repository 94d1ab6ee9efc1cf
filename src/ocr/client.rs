//! OCR Client
//!
//! Builds a provider from a service configuration, sends the image and
//! normalizes the response. Every failure comes back as an [`OcrResult`];
//! nothing is propagated to the caller.

use serde_json::Value;

use super::aliyun::{AliyunProvider, DEFAULT_ENDPOINT};
use super::provider::OcrProvider;
use super::types::{OcrError, OcrResult};
use crate::resolve::ResolvedImage;
use crate::settings::{OcrServiceConfig, ALIYUN_SERVICE};

/// Entry point for text recognition
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct OcrClient {
    http: reqwest::Client,
    endpoint: String,
}

impl Default for OcrClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl OcrClient {
    /// Create a client talking to the given provider endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Build the provider for a service configuration
    pub fn provider_for(&self, service: &OcrServiceConfig) -> Result<Box<dyn OcrProvider>, OcrError> {
        if !service.has_credentials() {
            return Err(OcrError::InvalidConfiguration);
        }

        match service.kind.as_str() {
            ALIYUN_SERVICE => Ok(Box::new(AliyunProvider::new(
                self.http.clone(),
                &self.endpoint,
                &service.access_key,
                &service.secret_key,
            )?)),
            other => Err(OcrError::UnsupportedService(other.to_string())),
        }
    }

    /// Recognize text in a resolved image using the given service
    pub async fn recognize_image(&self, image: &ResolvedImage, service: &OcrServiceConfig) -> OcrResult {
        let provider = match self.provider_for(service) {
            Ok(provider) => provider,
            Err(e) => {
                tracing::warn!("OCR service {} unusable: {}", service.kind, e);
                return e.into();
            }
        };

        recognize_with(provider.as_ref(), image).await
    }
}

/// Run one recognition against an already built provider
pub async fn recognize_with(provider: &dyn OcrProvider, image: &ResolvedImage) -> OcrResult {
    match request_text(provider, image).await {
        Ok(text) => {
            tracing::info!(
                "OCR via {} recognized {} chars from {}",
                provider.kind(),
                text.chars().count(),
                image.as_str()
            );
            OcrResult::recognized(text)
        }
        Err(e) => {
            tracing::warn!("OCR via {} failed for {}: {}", provider.kind(), image.as_str(), e);
            e.into()
        }
    }
}

async fn request_text(provider: &dyn OcrProvider, image: &ResolvedImage) -> Result<String, OcrError> {
    let response = match image {
        ResolvedImage::Remote(url) => provider.recognize_from_url(url).await?,
        ResolvedImage::Local(path) => {
            let data = tokio::fs::read(path)
                .await
                .map_err(|source| OcrError::ImageRead {
                    path: path.clone(),
                    source,
                })?;
            provider.recognize_from_bytes(data).await?
        }
    };

    extract_content(&response.body).ok_or(OcrError::Extraction)
}

/// Pull `data.content` out of a response body.
///
/// `data` may be an object or a JSON document encoded as a string, and the
/// key may be `data` or `Data`.
pub fn extract_content(body: &Value) -> Option<String> {
    let data = body.get("data").or_else(|| body.get("Data"))?;
    let data = match data {
        Value::String(raw) => serde_json::from_str::<Value>(raw).ok()?,
        other => other.clone(),
    };

    data.get("content")?.as_str().map(str::to_string)
}
