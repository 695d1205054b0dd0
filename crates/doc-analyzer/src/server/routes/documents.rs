//! Document upload and preview endpoints

use axum::{
    extract::{Multipart, Query, State},
    Json,
};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::server::upload::TempUpload;
use crate::types::{Preview, PreviewQuery, UploadResponse};

/// POST /api/documents - Upload a document and make it the current session
///
/// Multipart fields: `file` (required), `preview_chars` (optional).
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut preview_chars: Option<usize> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| Error::invalid_input("file field has no filename"))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;
                file = Some((filename, data.to_vec()));
            }
            "preview_chars" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| Error::invalid_input(format!("Failed to read preview_chars: {}", e)))?;
                let chars = raw.trim().parse().map_err(|_| {
                    Error::invalid_input(format!("preview_chars must be a number, got '{}'", raw))
                })?;
                preview_chars = Some(chars);
            }
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let (filename, data) = file.ok_or_else(|| Error::invalid_input("missing 'file' field"))?;
    tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

    let upload = TempUpload::write(&filename, &data)?;

    let mut analyzer = state.analyzer().await;
    let document = analyzer.load_file(upload.path(), upload.filename()).await?;
    drop(upload);

    let preview = analyzer.preview(preview_chars)?;

    Ok(Json(UploadResponse { document, preview }))
}

/// GET /api/documents/current/preview?chars=N
pub async fn preview_document(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<Preview>> {
    let analyzer = state.analyzer().await;
    Ok(Json(analyzer.preview(query.chars)?))
}
