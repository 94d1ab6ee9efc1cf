//! Image OCR Server Library
//!
//! Companion service for the Obsidian image OCR plugin. The plugin reports
//! context-menu interactions; this crate locates the image, resolves it
//! inside the vault, runs cloud OCR and writes result notes.
//!
//! # Modules
//!
//! - `locate`: find the image behind a click or cursor line
//! - `resolve`: turn an image reference into a URL or absolute path
//! - `ocr`: provider trait, Aliyun provider and the result-normalizing client
//! - `menu`: the menu entry offered for a located image
//! - `note`: OCR result notes
//! - `settings`: service configuration and its persistence

pub mod config;
pub mod error;
pub mod locate;
pub mod menu;
pub mod note;
pub mod ocr;
pub mod resolve;
pub mod routes;
pub mod settings;
pub mod state;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the HTTP application
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&state.config().server.allowed_origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/health", get(routes::health::health_check))
        .nest("/api/v1/ocr", routes::ocr::router())
        .nest("/api/v1/notes", routes::notes::router())
        .nest("/api/v1/settings", routes::settings::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Only the configured origins get CORS headers; other pages cannot read responses
fn allowed_origins(origins: &[String]) -> AllowOrigin {
    let values: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    AllowOrigin::list(values)
}
