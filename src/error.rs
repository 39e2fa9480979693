//! HTTP-facing error type.
//!
//! Every failure leaves the server as a JSON body `{ "error", "kind" }` with a
//! status that tells transport problems apart from unreadable upstream output.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::llm::LlmError;
use crate::logbook::LogbookError;
use crate::sheet::SheetError;
use crate::store::StoreError;

const SHEET_SHARING_HINT: &str = "Make sure the sheet is shared as \"Anyone with the link can view\"";

#[derive(Debug, Error)]
pub enum ApiError {
  /// Missing or unusable request input; no external call was made.
  #[error("{0}")]
  Validation(String),

  #[error(transparent)]
  Sheet(#[from] SheetError),

  #[error(transparent)]
  Llm(#[from] LlmError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl From<LogbookError> for ApiError {
  fn from(err: LogbookError) -> Self {
    match err {
      LogbookError::Llm(e) => ApiError::Llm(e),
      LogbookError::Store(e) => ApiError::Store(e),
    }
  }
}

/// Unreadable request bodies are input errors like any other.
impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::Validation(rejection.body_text())
  }
}

impl ApiError {
  pub fn validation(message: impl Into<String>) -> Self {
    ApiError::Validation(message.into())
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Sheet(SheetError::Status { status, .. }) => {
        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
      }
      ApiError::Sheet(_) | ApiError::Llm(_) => StatusCode::BAD_GATEWAY,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      ApiError::Validation(_) => "validation",
      ApiError::Sheet(SheetError::InvalidUrl(_)) => "configuration",
      ApiError::Sheet(_) => "transport",
      ApiError::Llm(e) if e.is_malformed() => "malformed_upstream",
      ApiError::Llm(_) => "transport",
      ApiError::Store(_) => "storage",
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let kind = self.kind();

    if !matches!(self, ApiError::Validation(_)) {
      tracing::error!(%status, kind, error = %self, "request failed");
    }

    let body = match &self {
      ApiError::Sheet(SheetError::Status { status, reason }) => json!({
        "error": "Failed to fetch Google Sheet",
        "kind": kind,
        "status": status,
        "statusText": reason,
        "message": SHEET_SHARING_HINT,
      }),
      _ => json!({
        "error": self.to_string(),
        "kind": kind,
      }),
    };

    (status, Json(body)).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert_eq!(ApiError::validation("Date parameter required").status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      ApiError::Sheet(SheetError::Status { status: 404, reason: "Not Found".into() }).status(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(
      ApiError::Llm(LlmError::Api("Overloaded".into())).status(),
      StatusCode::BAD_GATEWAY
    );
  }

  #[test]
  fn test_malformed_output_has_its_own_kind() {
    assert_eq!(ApiError::Llm(LlmError::Parse("bad json".into())).kind(), "malformed_upstream");
    assert_eq!(ApiError::Llm(LlmError::Request("timeout".into())).kind(), "transport");
  }

  #[test]
  fn test_logbook_errors_convert() {
    let err: ApiError = LogbookError::Llm(LlmError::Parse("x".into())).into();
    assert!(matches!(err, ApiError::Llm(LlmError::Parse(_))));
  }
}
