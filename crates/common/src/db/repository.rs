//! Repository pattern for database operations
//!
//! SeaORM implementation of `DocumentStore`.

use crate::db::models::*;
use crate::db::store::{DocumentStore, HistoryEntry, NewDocument};
use crate::db::DbPool;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }
}

#[async_trait]
impl DocumentStore for Repository {
    // ========================================================================
    // Document Operations
    // ========================================================================

    async fn create(&self, document: NewDocument) -> Result<Document> {
        let model = DocumentActiveModel {
            filename: Set(document.filename),
            content: Set(document.content),
            upload_date: Set(Utc::now()),
            file_size: Set(document.file_size),
            ..Default::default()
        };

        model.insert(self.conn()).await.map_err(Into::into)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Document>> {
        DocumentEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn get_most_recent(&self) -> Result<Option<Document>> {
        DocumentEntity::find()
            .order_by_desc(DocumentColumn::UploadDate)
            .order_by_desc(DocumentColumn::Id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn list(&self) -> Result<Vec<Document>> {
        DocumentEntity::find()
            .order_by_desc(DocumentColumn::UploadDate)
            .order_by_desc(DocumentColumn::Id)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let txn = self.conn().begin().await?;

        let history = ChatHistoryEntity::delete_many()
            .filter(ChatHistoryColumn::DocumentId.eq(id))
            .exec(&txn)
            .await?;

        let result = DocumentEntity::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;

        tracing::debug!(
            document_id = id,
            history_rows = history.rows_affected,
            "Document and history removed"
        );

        Ok(true)
    }

    // ========================================================================
    // History Operations
    // ========================================================================

    async fn append_history(
        &self,
        document_id: i64,
        question: &str,
        answer: &str,
    ) -> Result<QaExchange> {
        let model = ChatHistoryActiveModel {
            document_id: Set(document_id),
            question: Set(question.to_string()),
            answer: Set(answer.to_string()),
            timestamp: Set(Utc::now()),
            ..Default::default()
        };

        model.insert(self.conn()).await.map_err(Into::into)
    }

    async fn list_history(&self, document_id: Option<i64>, limit: u64) -> Result<Vec<HistoryEntry>> {
        let mut query = ChatHistoryEntity::find().find_also_related(DocumentEntity);

        if let Some(id) = document_id {
            query = query.filter(ChatHistoryColumn::DocumentId.eq(id));
        }

        let rows = query
            .order_by_desc(ChatHistoryColumn::Timestamp)
            .order_by_desc(ChatHistoryColumn::Id)
            .limit(limit)
            .all(self.conn())
            .await?;

        // Rows whose document is gone are skipped, matching an inner join
        let entries = rows
            .into_iter()
            .filter_map(|(exchange, document)| {
                document.map(|document| HistoryEntry {
                    id: exchange.id,
                    document_id: exchange.document_id,
                    filename: document.filename,
                    question: exchange.question,
                    answer: exchange.answer,
                    timestamp: exchange.timestamp,
                })
            })
            .collect();

        Ok(entries)
    }

    async fn clear_history(&self) -> Result<u64> {
        let result = ChatHistoryEntity::delete_many().exec(self.conn()).await?;
        Ok(result.rows_affected)
    }

    async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}
