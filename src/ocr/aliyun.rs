//! Aliyun OCR provider
//!
//! Calls the `RecognizeGeneral` action of the Aliyun OCR API (version
//! 2021-07-07). Requests are signed with ACS3-HMAC-SHA256:
//!
//! ```text
//! CanonicalRequest = Method \n URI \n Query \n Headers \n SignedHeaders \n hex(sha256(payload))
//! StringToSign     = "ACS3-HMAC-SHA256" \n hex(sha256(CanonicalRequest))
//! Signature        = hex(hmac_sha256(secret, StringToSign))
//! ```

use std::collections::BTreeMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use reqwest::Url;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::provider::{OcrProvider, ProviderResponse};
use super::types::OcrError;
use crate::settings::ALIYUN_SERVICE;

/// Regional endpoint used by the plugin
pub const DEFAULT_ENDPOINT: &str = "https://ocr-api.cn-hangzhou.aliyuncs.com";

const ACTION: &str = "RecognizeGeneral";
const API_VERSION: &str = "2021-07-07";
const SIGNATURE_ALGORITHM: &str = "ACS3-HMAC-SHA256";

/// Error body returned with non-2xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ApiError {
    code: String,
    message: String,
}

/// Aliyun general text recognition
pub struct AliyunProvider {
    http: reqwest::Client,
    endpoint: Url,
    access_key_id: String,
    access_key_secret: String,
}

impl AliyunProvider {
    pub fn new(
        http: reqwest::Client,
        endpoint: &str,
        access_key_id: &str,
        access_key_secret: &str,
    ) -> Result<Self, OcrError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| OcrError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if endpoint.host_str().is_none() {
            return Err(OcrError::InvalidEndpoint(format!("{} has no host", endpoint)));
        }

        Ok(Self {
            http,
            endpoint,
            access_key_id: access_key_id.to_string(),
            access_key_secret: access_key_secret.to_string(),
        })
    }

    /// Host header value, including a non-default port
    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    async fn call(
        &self,
        query: BTreeMap<String, String>,
        body: Option<Vec<u8>>,
    ) -> Result<ProviderResponse, OcrError> {
        let payload = body.as_deref().unwrap_or_default();
        let payload_hash = hex::encode(Sha256::digest(payload));

        let mut headers = BTreeMap::new();
        headers.insert("host".to_string(), self.host());
        headers.insert("x-acs-action".to_string(), ACTION.to_string());
        headers.insert("x-acs-version".to_string(), API_VERSION.to_string());
        headers.insert(
            "x-acs-date".to_string(),
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        );
        headers.insert(
            "x-acs-signature-nonce".to_string(),
            uuid::Uuid::new_v4().to_string(),
        );
        headers.insert("x-acs-content-sha256".to_string(), payload_hash.clone());
        if body.is_some() {
            headers.insert(
                "content-type".to_string(),
                "application/octet-stream".to_string(),
            );
        }

        let query_string = canonical_query(&query);
        let authorization = sign(
            &self.access_key_id,
            &self.access_key_secret,
            "POST",
            "/",
            &query_string,
            &headers,
            &payload_hash,
        )?;

        let mut url = self.endpoint.clone();
        url.set_path("/");
        url.set_query((!query_string.is_empty()).then_some(query_string.as_str()));

        // reqwest derives Host from the URL
        let mut request = self.http.post(url);
        for (name, value) in headers.iter().filter(|(name, _)| name.as_str() != "host") {
            request = request.header(name.as_str(), value.as_str());
        }
        request = request.header("Authorization", authorization);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let error: ApiError = serde_json::from_str(&text).unwrap_or_default();
            return Err(OcrError::Provider {
                status: status.as_u16(),
                code: error.code,
                message: if error.message.is_empty() { text } else { error.message },
            });
        }

        let body = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!("Aliyun OCR returned a non-JSON body: {}", e);
            OcrError::Extraction
        })?;

        Ok(ProviderResponse { body })
    }
}

#[async_trait]
impl OcrProvider for AliyunProvider {
    fn kind(&self) -> &'static str {
        ALIYUN_SERVICE
    }

    async fn recognize_from_url(&self, url: &str) -> Result<ProviderResponse, OcrError> {
        tracing::debug!("Aliyun OCR from URL {}", url);
        let mut query = BTreeMap::new();
        query.insert("Url".to_string(), url.to_string());
        self.call(query, None).await
    }

    async fn recognize_from_bytes(&self, image_data: Vec<u8>) -> Result<ProviderResponse, OcrError> {
        tracing::debug!("Aliyun OCR from {} bytes", image_data.len());
        self.call(BTreeMap::new(), Some(image_data)).await
    }
}

/// Sorted, RFC 3986 encoded query string
fn canonical_query(query: &BTreeMap<String, String>) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the `Authorization` header value.
///
/// `headers` must use lowercase names; every entry is signed.
fn sign(
    access_key_id: &str,
    access_key_secret: &str,
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    headers: &BTreeMap<String, String>,
    payload_hash: &str,
) -> Result<String, OcrError> {
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value.trim()))
        .collect();
    let signed_headers = headers
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        method, canonical_uri, canonical_query, canonical_headers, signed_headers, payload_hash
    );
    let string_to_sign = format!(
        "{}\n{}",
        SIGNATURE_ALGORITHM,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let mut mac = Hmac::<Sha256>::new_from_slice(access_key_secret.as_bytes())
        .map_err(|e| OcrError::Signing(e.to_string()))?;
    mac.update(string_to_sign.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());

    Ok(format!(
        "{} Credential={},SignedHeaders={},Signature={}",
        SIGNATURE_ALGORITHM, access_key_id, signed_headers, signature
    ))
}
