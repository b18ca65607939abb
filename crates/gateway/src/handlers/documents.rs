//! Document management handlers

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::services::preview;
use crate::AppState;
use docqa_common::errors::{AppError, Result};

/// Multipart field carrying the uploaded file
const FILE_FIELD: &str = "file";

/// Response after a successful upload
#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub document_id: i64,
    pub filename: String,
    pub characters: usize,
    pub preview: String,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub id: i64,
    pub filename: String,
    pub upload_date: String,
    pub file_size: i64,
    pub content_preview: String,
}

#[derive(Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Accept a PDF, DOCX or TXT upload and store its text
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let limit = state.config.ingestion.max_upload_bytes;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(|name| name.to_string())
            .ok_or_else(|| AppError::Validation {
                message: "Uploaded file must have a filename".to_string(),
                field: Some(FILE_FIELD.to_string()),
            })?;

        let data = field.bytes().await.map_err(|e| multipart_error(e, limit))?;
        file = Some((filename, data));
        break;
    }

    let (filename, data) = file.ok_or_else(|| AppError::Validation {
        message: "Missing multipart field 'file'".to_string(),
        field: Some(FILE_FIELD.to_string()),
    })?;

    let uploaded = state.qa.upload(&filename, &data).await?;

    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            message: "Document uploaded successfully".to_string(),
            document_id: uploaded.document.id,
            preview: preview(
                &uploaded.document.content,
                state.config.ingestion.preview_chars,
            ),
            filename: uploaded.document.filename,
            characters: uploaded.characters,
        }),
    ))
}

/// List all documents, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<DocumentListResponse>> {
    let preview_chars = state.config.ingestion.listing_preview_chars;

    let documents = state
        .qa
        .list_documents()
        .await?
        .into_iter()
        .map(|doc| DocumentSummary {
            id: doc.id,
            content_preview: preview(&doc.content, preview_chars),
            filename: doc.filename,
            upload_date: doc.upload_date.to_rfc3339(),
            file_size: doc.file_size,
        })
        .collect();

    Ok(Json(DocumentListResponse { documents }))
}

/// Delete a document and its chat history
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>> {
    state.qa.delete_document(id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: "Document deleted successfully".to_string(),
    }))
}

fn multipart_error(err: MultipartError, limit: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation {
            message: format!("Failed to read multipart body: {}", err.body_text()),
            field: Some(FILE_FIELD.to_string()),
        }
    }
}
