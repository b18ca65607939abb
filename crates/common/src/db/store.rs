//! Storage interface for documents and chat history
//!
//! Handlers and services depend on this trait rather than on a concrete
//! database, so the answer flow can run against any backing store.

use crate::db::models::{Document, QaExchange};
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document ready to be persisted
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub filename: String,
    pub content: String,
    pub file_size: i64,
}

/// A chat history row joined with its document's filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub document_id: i64,
    pub filename: String,
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// Trait for document and history persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document, assigning its id and upload timestamp
    async fn create(&self, document: NewDocument) -> Result<Document>;

    /// Find a document by id
    async fn get_by_id(&self, id: i64) -> Result<Option<Document>>;

    /// The most recently uploaded document
    async fn get_most_recent(&self) -> Result<Option<Document>>;

    /// All documents, newest first
    async fn list(&self) -> Result<Vec<Document>>;

    /// Delete a document together with its history. Returns false when the id is unknown.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Record an answered question
    async fn append_history(
        &self,
        document_id: i64,
        question: &str,
        answer: &str,
    ) -> Result<QaExchange>;

    /// History entries, newest first, optionally restricted to one document
    async fn list_history(&self, document_id: Option<i64>, limit: u64) -> Result<Vec<HistoryEntry>>;

    /// Remove every history entry. Returns the number removed.
    async fn clear_history(&self) -> Result<u64>;

    /// Check the store is reachable
    async fn ping(&self) -> Result<()>;
}
