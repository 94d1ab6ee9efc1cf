//! Note creation routes

use std::path::Path;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::note::create_note;
use crate::state::AppState;

/// Create the notes router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create))
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    /// Image reference the text came from
    pub image: String,
    /// Text as accepted by the user
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    /// Vault-relative path of the new note
    pub path: String,
}

async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<CreateNoteResponse>)> {
    if request.image.trim().is_empty() {
        return Err(AppError::BadRequest("image must not be empty".to_string()));
    }

    let vault_root = Path::new(&state.config().vault.root);
    let path = create_note(vault_root, &request.image, &request.text).await?;

    Ok((StatusCode::CREATED, Json(CreateNoteResponse { path })))
}
