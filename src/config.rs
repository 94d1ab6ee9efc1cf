//! Configuration management for the Image OCR server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::ocr::DEFAULT_ENDPOINT;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub vault: VaultConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VaultConfig {
    /// Filesystem root of the vault, without a trailing slash
    pub root: String,
    /// Plugin settings file (`data.json`)
    pub settings_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub endpoint: String,
    /// Credentials seeded into an unconfigured aliyun service
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
}

impl OcrConfig {
    /// Seed credentials, present only when both are set
    pub fn seed_credentials(&self) -> Option<(&str, &str)> {
        match (self.access_key.as_deref(), self.secret_key.as_deref()) {
            (Some(ak), Some(sk)) if !ak.is_empty() && !sk.is_empty() => Some((ak, sk)),
            _ => None,
        }
    }
}

/// Origin of the Obsidian desktop app
pub const OBSIDIAN_ORIGIN: &str = "app://obsidian.md";

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Default location of the plugin's data file inside a vault
fn default_settings_path(vault_root: &str) -> PathBuf {
    PathBuf::from(vault_root).join(".obsidian/plugins/image-ocr/data.json")
}

fn normalize_root(root: &str) -> String {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() && root.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                allowed_origins: vec![OBSIDIAN_ORIGIN.to_string()],
            },
            vault: VaultConfig {
                root: ".".to_string(),
                settings_path: default_settings_path("."),
            },
            ocr: OcrConfig {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                access_key: None,
                secret_key: None,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let root = normalize_root(&env::var("VAULT_PATH")?);
        let settings_path = env::var("SETTINGS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_settings_path(&root));

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
                allowed_origins: env::var("CORS_ORIGINS")
                    .map(|raw| parse_origins(&raw))
                    .unwrap_or_else(|_| vec![OBSIDIAN_ORIGIN.to_string()]),
            },
            vault: VaultConfig {
                root,
                settings_path,
            },
            ocr: OcrConfig {
                endpoint: env::var("ALIYUN_OCR_ENDPOINT")
                    .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
                access_key: env::var("ALI_AK").ok(),
                secret_key: env::var("ALI_SK").ok(),
            },
        })
    }
}
