//! Chat history handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use docqa_common::errors::Result;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub document_id: Option<i64>,
    pub limit: Option<u64>,
}

#[derive(Serialize)]
pub struct HistoryItem {
    pub question: String,
    pub answer: String,
    pub timestamp: String,
    pub document: String,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryItem>,
}

#[derive(Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: String,
    pub removed: u64,
}

/// Recent questions and answers, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>> {
    let history = state
        .qa
        .history(params.document_id, params.limit)
        .await?
        .into_iter()
        .map(|entry| HistoryItem {
            question: entry.question,
            answer: entry.answer,
            timestamp: entry.timestamp.to_rfc3339(),
            document: entry.filename,
        })
        .collect();

    Ok(Json(HistoryResponse { history }))
}

pub async fn clear(State(state): State<AppState>) -> Result<Json<ClearHistoryResponse>> {
    let removed = state.qa.clear_history().await?;

    Ok(Json(ClearHistoryResponse {
        success: true,
        message: "Chat history cleared".to_string(),
        removed,
    }))
}
