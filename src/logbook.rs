//! Workout logging
//!
//! Turns a free-text workout log into a [`ParsedWorkout`] with the parsing
//! model, derives block scores, catalog movements and benchmark PRs from it,
//! and writes everything in one transaction.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::llm::{extract_json, LanguageModel, LlmError};
use crate::models::{NewBenchmarkPr, NewBlockScore, NewMovement, NewWorkout, ParsedWorkout};
use crate::scoring::{
  is_known_benchmark, movement_category, movement_pattern, primary_score, score_display,
  score_value,
};
use crate::store::{insert_workout_record, StoreError, WorkoutRecord};

/// Fixed confidence recorded for every model parse.
pub const PARSE_CONFIDENCE: f64 = 0.85;
const PARSE_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LogbookError {
  #[error(transparent)]
  Llm(#[from] LlmError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// Result of logging one session.
#[derive(Debug, Clone, Serialize)]
pub struct LoggedWorkout {
  pub workout_id: i64,
  pub primary_score: String,
  pub parsed: ParsedWorkout,
}

fn build_user_prompt(text: &str, date: NaiveDate) -> String {
  format!(
    r#"# Workout to Parse

**Date:** {}

**Raw Input:**
{}

Parse this workout and return structured JSON matching the schema."#,
    date, text
  )
}

/// Ask the model for a structured parse of `text`.
pub async fn parse_workout(
  llm: &dyn LanguageModel,
  text: &str,
  date: NaiveDate,
) -> Result<ParsedWorkout, LlmError> {
  let system_prompt = include_str!("prompts/parser_system.txt");
  let user_prompt = build_user_prompt(text, date);

  let (response_text, _usage) = llm
    .complete(system_prompt, &user_prompt, PARSE_MAX_TOKENS)
    .await?;

  let json_str = extract_json(&response_text)?;
  serde_json::from_str(&json_str).map_err(|e| LlmError::Parse(format!("{}: {}", e, json_str)))
}

/// A zero in a model score means "not measured" and is stored as NULL.
fn non_zero<T: PartialEq + Default>(value: Option<T>) -> Option<T> {
  value.filter(|v| *v != T::default())
}

/// Derive every row a parsed log produces.
pub fn build_record(
  text: &str,
  date: NaiveDate,
  parsed: &ParsedWorkout,
) -> Result<WorkoutRecord, StoreError> {
  let blocks_json =
    serde_json::to_string(&parsed.blocks).map_err(|e| StoreError::Encode("blocks", e))?;
  let tags_json = serde_json::to_string(&parsed.tags).map_err(|e| StoreError::Encode("tags", e))?;

  let workout = NewWorkout {
    workout_date: date,
    input_text: text.to_string(),
    blocks_json,
    primary_score: primary_score(&parsed.blocks),
    total_duration_min: None,
    tags_json,
    notes: parsed.notes.clone().filter(|n| !n.is_empty()),
    rpe: parsed.rpe,
    parse_confidence: Some(PARSE_CONFIDENCE),
  };

  let block_scores = parsed
    .blocks
    .iter()
    .map(|block| {
      let score = block.block_score.clone().unwrap_or_default();
      NewBlockScore {
        block_type: block.block_type.to_string(),
        block_title: block.title().map(String::from),
        rounds_completed: non_zero(score.rounds_completed),
        extra_reps: non_zero(score.extra_reps),
        time_s: non_zero(score.time_s),
        total_reps: non_zero(score.total_reps),
        tonnage_lb: non_zero(score.tonnage_lb),
        rx_status: score.rx_status.clone(),
        is_pr: score.is_pr(),
      }
    })
    .collect();

  let names: BTreeSet<&str> = parsed
    .blocks
    .iter()
    .flat_map(|block| block.movement_names())
    .collect();

  let mut movements = Vec::with_capacity(names.len());
  for name in names {
    let aliases = serde_json::to_string(&[name.to_lowercase()])
      .map_err(|e| StoreError::Encode("aliases", e))?;
    movements.push(NewMovement {
      canonical_name: name.to_string(),
      category: movement_category(name).to_string(),
      movement_pattern: movement_pattern(name).to_string(),
      aliases_json: aliases,
    });
  }

  let benchmark_prs = parsed
    .blocks
    .iter()
    .filter_map(|block| {
      let title = block.title().filter(|t| is_known_benchmark(t))?;
      let score = block.block_score.as_ref().filter(|s| s.is_pr())?;
      Some(NewBenchmarkPr {
        benchmark_name: title.to_string(),
        date,
        score_value: score_value(score),
        score_display: score_display(score, block.score_model.as_ref().map(|m| m.scoring)),
        rx_status: score
          .rx_status
          .clone()
          .unwrap_or_else(|| "UNKNOWN".to_string()),
      })
    })
    .collect();

  Ok(WorkoutRecord {
    workout,
    block_scores,
    movements,
    benchmark_prs,
  })
}

/// Parse, score and persist one free-text workout log.
pub async fn log_workout(
  pool: &SqlitePool,
  llm: &dyn LanguageModel,
  text: &str,
  date: NaiveDate,
) -> Result<LoggedWorkout, LogbookError> {
  let parsed = parse_workout(llm, text, date).await?;
  let record = build_record(text, date, &parsed)?;
  let workout_id = insert_workout_record(pool, &record).await?;

  tracing::info!(
    workout_id,
    %date,
    blocks = parsed.blocks.len(),
    prs = record.benchmark_prs.len(),
    "workout logged"
  );

  Ok(LoggedWorkout {
    workout_id,
    primary_score: record.workout.primary_score,
    parsed,
  })
}
