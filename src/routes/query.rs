use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::AppState;
use crate::error::ApiError;
use crate::history::{answer_question, load_context};

#[derive(Debug, Deserialize)]
pub struct QueryRequest {
  pub question: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
  pub success: bool,
  pub answer: String,
}

/// `POST /api/query`
pub async fn query_history(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
  let Json(request) = payload?;
  let question = request
    .question
    .filter(|q| !q.trim().is_empty())
    .ok_or_else(|| ApiError::validation("Question is required"))?;

  let context = load_context(&state.db, Local::now().date_naive()).await?;
  let answer = answer_question(state.llm.as_ref(), &question, &context).await?;

  Ok(Json(QueryResponse {
    success: true,
    answer,
  }))
}
