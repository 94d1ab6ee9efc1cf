//! OCR result notes
//!
//! Writes recognized text into a new markdown note at the vault root, next
//! to an embed of the source image.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// Note creation errors
#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("Note already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to write note {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A note ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrNote {
    /// Vault-relative file name
    pub file_name: String,
    pub content: String,
}

/// Last path segment of an image reference, `image` when empty
fn image_name(image_path: &str) -> &str {
    match image_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "image",
    }
}

/// Drop a trailing `.ext` made of word characters
fn strip_extension(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, ext))
            if !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_') =>
        {
            stem
        }
        _ => name,
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// Build the note for an OCR result
pub fn build_note(image_path: &str, text: &str, timestamp_millis: i64) -> OcrNote {
    let name = image_name(image_path);
    let file_name = format!(
        "OCR_{}_{}.md",
        sanitize_file_name(strip_extension(name)),
        timestamp_millis
    );
    let content = format!(
        "# OCR result: {}\n\n![]({})\n\n<pre>\n{}\n</pre>",
        name,
        image_path,
        html_escape::encode_text(text)
    );

    OcrNote { file_name, content }
}

/// Create the note in the vault, returning its vault-relative name.
///
/// Never overwrites an existing file.
pub async fn create_note(vault_root: &Path, image_path: &str, text: &str) -> Result<String, NoteError> {
    let note = build_note(image_path, text, chrono::Utc::now().timestamp_millis());
    let path = vault_root.join(&note.file_name);

    let io_error = |source: std::io::Error| NoteError::Io {
        path: path.clone(),
        source,
    };

    let mut file = match tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(NoteError::AlreadyExists(note.file_name));
        }
        Err(e) => return Err(io_error(e)),
    };

    file.write_all(note.content.as_bytes()).await.map_err(io_error)?;
    file.flush().await.map_err(io_error)?;

    tracing::info!("Created OCR note {}", path.display());
    Ok(note.file_name)
}
