//! Question answering handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppState;
use docqa_common::errors::{AppError, Result};

/// Request to ask a question
#[derive(Debug, Deserialize, Validate)]
pub struct AskRequest {
    #[validate(length(min = 1, max = 2000))]
    pub question: String,

    /// Target document; the most recent upload when absent
    #[serde(default)]
    pub document_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub question: String,
    pub answer: String,
    pub intent: String,
    pub document: String,
    pub document_id: i64,
    pub timestamp: String,
}

pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("question".to_string()),
    })?;

    let outcome = state.qa.ask(&request.question, request.document_id).await?;

    Ok(Json(AskResponse {
        question: outcome.question,
        answer: outcome.answer,
        intent: outcome.intent.as_str().to_string(),
        document: outcome.filename,
        document_id: outcome.document_id,
        timestamp: outcome.timestamp.to_rfc3339(),
    }))
}
