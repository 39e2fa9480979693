//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Substitute sheet and language-model collaborators
//! - Helper assertions

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::db::AppState;
use crate::llm::{LanguageModel, LlmError, Usage};
use crate::models::{NewBenchmarkPr, NewBlockScore, NewMovement, NewWorkout};
use crate::sheet::{SheetError, SheetSource};
use crate::store::WorkoutRecord;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A Fran PR logged on `date`
pub fn mock_workout_record(date: &str) -> WorkoutRecord {
  let workout_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid test date");

  WorkoutRecord {
    workout: NewWorkout {
      workout_date,
      input_text: "Fran 4:12 rx, PR!".to_string(),
      blocks_json: "[]".to_string(),
      primary_score: "Fran: 4:12 RX".to_string(),
      total_duration_min: None,
      tags_json: r#"["benchmark"]"#.to_string(),
      notes: None,
      rpe: Some(9.0),
      parse_confidence: Some(0.85),
    },
    block_scores: vec![NewBlockScore {
      block_type: "FOR_TIME".to_string(),
      block_title: Some("Fran".to_string()),
      rounds_completed: None,
      extra_reps: None,
      time_s: Some(252),
      total_reps: Some(90),
      tonnage_lb: None,
      rx_status: Some("RX".to_string()),
      is_pr: true,
    }],
    movements: vec![
      NewMovement {
        canonical_name: "Thruster".to_string(),
        category: "GYMNASTICS".to_string(),
        movement_pattern: "mixed".to_string(),
        aliases_json: r#"["thruster"]"#.to_string(),
      },
      NewMovement {
        canonical_name: "Pull-up".to_string(),
        category: "GYMNASTICS".to_string(),
        movement_pattern: "pull".to_string(),
        aliases_json: r#"["pull-up"]"#.to_string(),
      },
    ],
    benchmark_prs: vec![NewBenchmarkPr {
      benchmark_name: "Fran".to_string(),
      date: workout_date,
      score_value: Some(252.0),
      score_display: "4:12".to_string(),
      rx_status: "RX".to_string(),
    }],
  }
}

/// Model output for "Fran 4:12 rx" followed by a squat block
pub const FRAN_PARSE_JSON: &str = r#"{
  "blocks": [
    {
      "block_type": "FOR_TIME",
      "title": "Fran",
      "score_model": {"scoring": "TIME"},
      "segments": [{
        "rounds": 1,
        "events": [
          {"movement_name": "Thruster", "prescribed": {"reps": 45, "load": {"value": 95, "unit": "lb"}}},
          {"movement_name": "Pull-up", "prescribed": {"reps": 45}}
        ]
      }],
      "block_score": {"time_s": 252, "total_reps": 90, "rx_status": "RX", "is_pr": true}
    },
    {
      "block_type": "STRENGTH",
      "title": "Back Squat",
      "segments": [{"events": [{"movement_name": "Back Squat", "performed": {"reps": 25, "load": {"value": 225, "unit": "lb"}}}]}],
      "block_score": {"tonnage_lb": 5625, "is_pr": false}
    }
  ],
  "tags": ["benchmark", "strength"],
  "notes": "Felt fast",
  "rpe": 9
}"#;

/// ---------------------------------------------------------------------------
/// Substitute Collaborators
/// ---------------------------------------------------------------------------

/// Sheet source that serves a fixed export (or a fixed failure) and counts fetches
pub struct StaticSheet {
  csv: Result<String, u16>,
  fetches: AtomicUsize,
}

impl StaticSheet {
  pub fn new(csv: &str) -> Self {
    Self {
      csv: Ok(csv.to_string()),
      fetches: AtomicUsize::new(0),
    }
  }

  /// Every fetch fails with the given upstream status
  pub fn failing(status: u16) -> Self {
    Self {
      csv: Err(status),
      fetches: AtomicUsize::new(0),
    }
  }

  pub fn fetch_count(&self) -> usize {
    self.fetches.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl SheetSource for StaticSheet {
  fn sheet_id(&self) -> &str {
    "test-sheet"
  }

  async fn fetch_csv(&self) -> Result<String, SheetError> {
    self.fetches.fetch_add(1, Ordering::SeqCst);
    match &self.csv {
      Ok(csv) => Ok(csv.clone()),
      Err(status) => Err(SheetError::Status {
        status: *status,
        reason: "Forbidden".to_string(),
      }),
    }
  }
}

/// Language model that replays queued replies and records every prompt it saw
#[derive(Default)]
pub struct ScriptedModel {
  replies: Mutex<VecDeque<Result<String, LlmError>>>,
  prompts: Mutex<Vec<(String, String, u32)>>,
}

impl ScriptedModel {
  pub fn replying(replies: Vec<Result<String, LlmError>>) -> Self {
    Self {
      replies: Mutex::new(replies.into()),
      prompts: Mutex::new(Vec::new()),
    }
  }

  /// `(system_prompt, user_message, max_tokens)` for each call so far
  pub fn prompts(&self) -> Vec<(String, String, u32)> {
    self.prompts.lock().expect("prompts lock").clone()
  }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
  async fn complete(
    &self,
    system_prompt: &str,
    user_message: &str,
    max_tokens: u32,
  ) -> Result<(String, Usage), LlmError> {
    self
      .prompts
      .lock()
      .expect("prompts lock")
      .push((system_prompt.to_string(), user_message.to_string(), max_tokens));

    let reply = self
      .replies
      .lock()
      .expect("replies lock")
      .pop_front()
      .unwrap_or_else(|| Err(LlmError::Request("no scripted reply left".to_string())));

    reply.map(|text| (text, Usage::default()))
  }
}

/// Shared state wired to an in-memory database and the given substitutes
pub async fn test_state(
  sheets: Arc<StaticSheet>,
  llm: Arc<ScriptedModel>,
) -> Arc<AppState> {
  let pool = setup_test_db().await;
  Arc::new(AppState::new(pool, sheets, llm))
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('workouts', 'block_scores', 'movements', 'benchmark_prs')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 4, "Expected 4 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_static_sheet_counts_fetches() {
    let sheet = StaticSheet::new("7/28/2025\nMurph\n");
    assert_eq!(sheet.fetch_csv().await.unwrap(), "7/28/2025\nMurph\n");
    assert_eq!(sheet.fetch_count(), 1);

    let failing = StaticSheet::failing(403);
    assert!(matches!(
      failing.fetch_csv().await,
      Err(SheetError::Status { status: 403, .. })
    ));
  }

  #[tokio::test]
  async fn test_scripted_model_replays_in_order() {
    let model = ScriptedModel::replying(vec![Ok("one".into()), Ok("two".into())]);

    assert_eq!(model.complete("s", "a", 10).await.unwrap().0, "one");
    assert_eq!(model.complete("s", "b", 20).await.unwrap().0, "two");
    assert!(model.complete("s", "c", 30).await.is_err());
    assert_eq!(model.prompts().len(), 3);
    assert_eq!(model.prompts()[1].2, 20);
  }

  #[test]
  fn test_fran_fixture_is_valid_json() {
    let value: serde_json::Value = serde_json::from_str(FRAN_PARSE_JSON).unwrap();
    assert_eq!(value["blocks"].as_array().unwrap().len(), 2);
  }
}
