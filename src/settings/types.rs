//! Settings Types
//!
//! Persisted plugin settings: which OCR service is the default and the
//! credentials for each configured service.

use serde::{Deserialize, Serialize};

/// Provider key of the built-in Aliyun service
pub const ALIYUN_SERVICE: &str = "aliyun";

/// Configuration of a single OCR service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrServiceConfig {
    /// Display label
    pub name: String,
    /// Provider key (e.g. "aliyun")
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub secret_key: String,
}

impl OcrServiceConfig {
    /// Both credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.access_key.trim().is_empty() && !self.secret_key.trim().is_empty()
    }
}

/// Plugin settings as stored in `data.json`
///
/// Missing top-level keys fall back to the defaults, so a stored
/// `services` array replaces the default list as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OcrSettings {
    /// Provider key of the service used for new requests
    pub default_service: String,
    pub services: Vec<OcrServiceConfig>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            default_service: ALIYUN_SERVICE.to_string(),
            services: vec![OcrServiceConfig {
                name: "Aliyun OCR".to_string(),
                kind: ALIYUN_SERVICE.to_string(),
                enabled: true,
                access_key: String::new(),
                secret_key: String::new(),
            }],
        }
    }
}

impl OcrSettings {
    /// The service consulted for OCR requests: the first enabled service
    /// whose type matches `default_service`.
    pub fn active_service(&self) -> Option<&OcrServiceConfig> {
        self.services
            .iter()
            .find(|s| s.kind == self.default_service && s.enabled)
    }

    /// Services offered as default-service choices
    pub fn enabled_services(&self) -> Vec<&OcrServiceConfig> {
        self.services.iter().filter(|s| s.enabled).collect()
    }

    pub fn service_mut(&mut self, kind: &str) -> Option<&mut OcrServiceConfig> {
        self.services.iter_mut().find(|s| s.kind == kind)
    }

    /// Fill in credentials for a service that has none yet.
    ///
    /// Returns true when the settings changed.
    pub fn seed_credentials(&mut self, kind: &str, access_key: &str, secret_key: &str) -> bool {
        match self.service_mut(kind) {
            Some(service) if !service.has_credentials() => {
                service.access_key = access_key.to_string();
                service.secret_key = secret_key.to_string();
                true
            }
            _ => false,
        }
    }

    /// Carry over secret keys that a replacement left blank.
    ///
    /// A blank secret means unchanged; clearing goes through [`ServiceUpdate`].
    pub fn keep_secrets_from(&mut self, previous: &OcrSettings) {
        for service in self.services.iter_mut().filter(|s| s.secret_key.is_empty()) {
            if let Some(old) = previous.services.iter().find(|s| s.kind == service.kind) {
                service.secret_key = old.secret_key.clone();
            }
        }
    }
}

/// A service as returned to clients, without its secret key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    pub access_key: String,
    pub has_secret_key: bool,
}

impl From<&OcrServiceConfig> for ServiceView {
    fn from(service: &OcrServiceConfig) -> Self {
        Self {
            name: service.name.clone(),
            kind: service.kind.clone(),
            enabled: service.enabled,
            access_key: service.access_key.clone(),
            has_secret_key: !service.secret_key.trim().is_empty(),
        }
    }
}

/// Settings as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub default_service: String,
    pub services: Vec<ServiceView>,
}

impl From<&OcrSettings> for SettingsView {
    fn from(settings: &OcrSettings) -> Self {
        Self {
            default_service: settings.default_service.clone(),
            services: settings.services.iter().map(ServiceView::from).collect(),
        }
    }
}

/// Partial update of one service, as sent by the settings UI
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    pub enabled: Option<bool>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl ServiceUpdate {
    pub fn apply(&self, service: &mut OcrServiceConfig) {
        if let Some(enabled) = self.enabled {
            service.enabled = enabled;
        }
        if let Some(access_key) = &self.access_key {
            service.access_key = access_key.clone();
        }
        if let Some(secret_key) = &self.secret_key {
            service.secret_key = secret_key.clone();
        }
    }
}
