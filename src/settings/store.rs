//! Settings persistence
//!
//! Settings live in the plugin's `data.json`. The store is injected into
//! the application state so tests can swap in an in-memory backend.

use std::path::PathBuf;

use tokio::sync::RwLock;

use super::types::OcrSettings;

/// Settings persistence errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Trait for settings storage backends
#[async_trait::async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings, falling back to defaults for anything not stored
    async fn load(&self) -> Result<OcrSettings, SettingsError>;

    /// Persist settings
    async fn save(&self, settings: &OcrSettings) -> Result<(), SettingsError>;
}

/// Settings stored as pretty-printed JSON on disk
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl SettingsStore for JsonFileStore {
    async fn load(&self) -> Result<OcrSettings, SettingsError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No settings at {}, using defaults", self.path.display());
                return Ok(OcrSettings::default());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if raw.trim().is_empty() {
            return Ok(OcrSettings::default());
        }

        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, settings: &OcrSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }

        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| self.io_error(e))?;

        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs
#[derive(Default)]
pub struct MemoryStore {
    settings: RwLock<Option<OcrSettings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: OcrSettings) -> Self {
        Self {
            settings: RwLock::new(Some(settings)),
        }
    }
}

#[async_trait::async_trait]
impl SettingsStore for MemoryStore {
    async fn load(&self) -> Result<OcrSettings, SettingsError> {
        Ok(self.settings.read().await.clone().unwrap_or_default())
    }

    async fn save(&self, settings: &OcrSettings) -> Result<(), SettingsError> {
        *self.settings.write().await = Some(settings.clone());
        Ok(())
    }
}
