//! Settings Module
//!
//! OCR service configuration and its persistence.

mod store;
mod types;

pub use store::{JsonFileStore, MemoryStore, SettingsError, SettingsStore};
pub use types::{
    OcrServiceConfig, OcrSettings, ServiceUpdate, ServiceView, SettingsView, ALIYUN_SERVICE,
};
