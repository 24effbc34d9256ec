//! Upload endpoint
//!
//! `POST /upload-tuning-file/` receives one multipart `file` field, spools
//! it to transient storage, extracts metadata with the parser matching the
//! file's extension, inserts the mapping into the matching table, removes
//! the spooled file, and returns the metadata to the caller.

use axum::{
    Router,
    routing::post,
    Json,
    extract::{Multipart, State},
    response::Json as ResponseJson,
};
use bytes::Bytes;
use std::path::Path;
use tracing::{info, warn};

use crate::db::DatabaseOperations;
use crate::models::{AppState, DocumentKind, Metadata, UploadResponse};
use crate::parsers;
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/upload-tuning-file/", post(upload_tuning_file))
        .with_state(state)
}

async fn upload_tuning_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<ResponseJson<UploadResponse>> {
    let (filename, data) = read_file_field(multipart).await?;
    info!("Upload received: {} ({} bytes)", filename, data.len());

    let spooled = state.storage.spool(&filename, &data).await?;
    let result = ingest(&state, &filename, spooled.path()).await;

    // The transient file goes away once parsing and insertion have been
    // attempted, on success and failure alike.
    match spooled.remove().await {
        Ok(()) => {}
        Err(e) if result.is_ok() => return Err(AppError::TransientIo(e)),
        Err(e) => warn!("Failed to remove spooled upload: {}", e),
    }

    let metadata = result?;
    info!("Upload stored: {}", filename);

    Ok(Json(UploadResponse::success(metadata)))
}

/// Classify, parse, insert, and apply the in-band `error` check.
///
/// The insert happens before the `error` check, preserving the original
/// contract of storing raw extraction attempts regardless of outcome.
async fn ingest(state: &AppState, filename: &str, path: &Path) -> AppResult<Metadata> {
    let kind = DocumentKind::from_filename(filename).ok_or(AppError::UnsupportedType)?;

    let metadata = match kind {
        DocumentKind::Html => parsers::parse_html_file(path)?,
        DocumentKind::Pdf => parsers::parse_manual_pdf(path)?,
    };

    DatabaseOperations::insert_metadata(&state.pool, kind.target_table(), &metadata).await?;

    if let Some(error) = metadata.get("error") {
        return Err(AppError::ParseFailed(error.clone()));
    }

    Ok(metadata)
}

async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Bytes)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .map(|name| name.to_string())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::InvalidRequest("file field has no filename".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(e.to_string()))?;

        return Ok((filename, data));
    }

    Err(AppError::InvalidRequest(
        "missing multipart field `file`".to_string(),
    ))
}
