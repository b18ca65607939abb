//! Question answering service
//!
//! Handles the two core workflows:
//! 1. Upload: extract text, validate length, persist the document
//! 2. Ask: pick the target document, run the answer engine, record history

use docqa_common::{
    config::AppConfig,
    db::{models::Document, DocumentStore, HistoryEntry, NewDocument},
    engine::{self, char_len, char_prefix, AnswerSource, Intent},
    errors::{AppError, Result},
    metrics,
};
use docqa_ingestion::{extract_text, FileKind};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// A stored upload together with the detected file kind
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub document: Document,
    pub kind: FileKind,
    pub characters: usize,
}

/// Result of answering one question
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub question: String,
    pub answer: String,
    pub intent: Intent,
    pub source: AnswerSource,
    pub document_id: i64,
    pub filename: String,
    pub timestamp: DateTime<Utc>,
}

pub struct QaService {
    store: Arc<dyn DocumentStore>,
    config: Arc<AppConfig>,
}

impl QaService {
    pub fn new(store: Arc<dyn DocumentStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Extract, validate and store an uploaded file
    pub async fn upload(&self, filename: &str, data: &[u8]) -> Result<UploadedDocument> {
        let limit = self.config.ingestion.max_upload_bytes;
        if data.len() > limit {
            metrics::record_rejected_upload("too_large");
            return Err(AppError::PayloadTooLarge { limit });
        }

        let extracted = extract_text(filename, data).map_err(|e| {
            warn!(filename = %filename, error = %e, "Extraction failed");
            metrics::record_rejected_upload(e.reason());
            AppError::from(e)
        })?;

        let characters = char_len(&extracted.text);
        let min = self.config.ingestion.min_text_chars;
        if characters < min {
            metrics::record_rejected_upload("too_short");
            return Err(AppError::DocumentTooShort {
                chars: characters,
                min,
            });
        }

        let document = self
            .store
            .create(NewDocument {
                filename: filename.to_string(),
                content: extracted.text,
                file_size: data.len() as i64,
            })
            .await?;

        metrics::record_upload(extracted.kind.as_str(), data.len());

        info!(
            document_id = document.id,
            filename = %document.filename,
            kind = %extracted.kind,
            characters,
            "Document stored"
        );

        Ok(UploadedDocument {
            document,
            kind: extracted.kind,
            characters,
        })
    }

    /// Answer a question against one document, or the most recent upload.
    /// A document id of 0 means "no document chosen".
    pub async fn ask(&self, question: &str, document_id: Option<i64>) -> Result<AskOutcome> {
        if question.trim().is_empty() {
            return Err(AppError::Validation {
                message: "Question must not be empty".to_string(),
                field: Some("question".to_string()),
            });
        }

        let document = match chosen_document(document_id) {
            Some(id) => self
                .store
                .get_by_id(id)
                .await?
                .ok_or(AppError::DocumentNotFound { id })?,
            None => self
                .store
                .get_most_recent()
                .await?
                .ok_or(AppError::NoDocuments)?,
        };

        let start = Instant::now();
        let result = engine::answer_question(question, &document.content);
        let elapsed = start.elapsed();

        let exchange = self
            .store
            .append_history(document.id, question, &result.answer.text)
            .await?;

        metrics::record_answer(
            elapsed.as_secs_f64(),
            result.intent.as_str(),
            result.answer.source.as_str(),
        );

        info!(
            document_id = document.id,
            intent = %result.intent,
            source = result.answer.source.as_str(),
            elapsed_us = elapsed.as_micros() as u64,
            "Question answered"
        );

        Ok(AskOutcome {
            question: question.to_string(),
            answer: result.answer.text,
            intent: result.intent,
            source: result.answer.source,
            document_id: document.id,
            filename: document.filename,
            timestamp: exchange.timestamp,
        })
    }

    /// All documents, newest first
    pub async fn list_documents(&self) -> Result<Vec<Document>> {
        self.store.list().await
    }

    /// Delete a document and its history
    pub async fn delete_document(&self, id: i64) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::DocumentNotFound { id });
        }

        metrics::record_deletion();
        info!(document_id = id, "Document deleted");
        Ok(())
    }

    /// Recent history, optionally for one document
    pub async fn history(
        &self,
        document_id: Option<i64>,
        limit: Option<u64>,
    ) -> Result<Vec<HistoryEntry>> {
        let limit = self.config.history_limit(limit);
        self.store
            .list_history(chosen_document(document_id), limit)
            .await
    }

    /// Remove all history entries
    pub async fn clear_history(&self) -> Result<u64> {
        let removed = self.store.clear_history().await?;
        info!(removed, "Chat history cleared");
        Ok(removed)
    }
}

/// Clients send 0 when no document is selected
fn chosen_document(document_id: Option<i64>) -> Option<i64> {
    document_id.filter(|&id| id != 0)
}

/// First `max_chars` characters, with "..." appended when truncated
pub fn preview(text: &str, max_chars: usize) -> String {
    if char_len(text) > max_chars {
        format!("{}...", char_prefix(text, max_chars))
    } else {
        text.to_string()
    }
}
