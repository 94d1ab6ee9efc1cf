//! Application state management

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::AppError;
use crate::ocr::OcrClient;
use crate::settings::{OcrSettings, SettingsError, SettingsStore, ALIYUN_SERVICE};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    store: Arc<dyn SettingsStore>,
    settings: RwLock<OcrSettings>,
    ocr: OcrClient,
}

impl AppState {
    /// Create a new application state
    ///
    /// Loads settings from the store and seeds aliyun credentials from the
    /// configuration when the stored service has none.
    pub async fn new(config: Config, store: Arc<dyn SettingsStore>) -> Result<Self, SettingsError> {
        let mut settings = store.load().await?;

        if let Some((access_key, secret_key)) = config.ocr.seed_credentials() {
            if settings.seed_credentials(ALIYUN_SERVICE, access_key, secret_key) {
                tracing::info!("Seeded aliyun credentials from environment");
                store.save(&settings).await?;
            }
        }

        let ocr = OcrClient::new(config.ocr.endpoint.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                settings: RwLock::new(settings),
                ocr,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the OCR client
    pub fn ocr(&self) -> &OcrClient {
        &self.inner.ocr
    }

    /// Snapshot of the current settings
    pub async fn settings(&self) -> OcrSettings {
        self.inner.settings.read().await.clone()
    }

    /// Apply an edit, persist it, then publish it.
    ///
    /// The in-memory settings only change once the store accepted them.
    pub async fn update_settings<F>(&self, edit: F) -> Result<OcrSettings, AppError>
    where
        F: FnOnce(&mut OcrSettings) -> Result<(), AppError>,
    {
        let mut current = self.inner.settings.write().await;
        let mut next = current.clone();
        edit(&mut next)?;

        self.inner.store.save(&next).await?;
        *current = next.clone();

        Ok(next)
    }
}
