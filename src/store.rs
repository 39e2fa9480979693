//! Persistence for logged workouts, block scores, movements and benchmark PRs.
//!
//! Single-user deployment: every row is written with a NULL `user_id`.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::models::{
  BenchmarkPr, NewBenchmarkPr, NewBlockScore, NewMovement, NewWorkout, Workout, WorkoutSummary,
};

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Failed to encode {0}: {1}")]
  Encode(&'static str, serde_json::Error),
}

/// Everything derived from one parsed log, written together.
#[derive(Debug, Clone)]
pub struct WorkoutRecord {
  pub workout: NewWorkout,
  pub block_scores: Vec<NewBlockScore>,
  pub movements: Vec<NewMovement>,
  pub benchmark_prs: Vec<NewBenchmarkPr>,
}

/// ---------------------------------------------------------------------------
/// Writes
/// ---------------------------------------------------------------------------

/// Insert a workout with its block scores, movements and PRs in one transaction.
/// Returns the new workout id.
pub async fn insert_workout_record(
  pool: &SqlitePool,
  record: &WorkoutRecord,
) -> Result<i64, StoreError> {
  let mut tx = pool.begin().await?;
  let w = &record.workout;

  let workout_id = sqlx::query(
    r#"
    INSERT INTO workouts (
      user_id, workout_date, input_text, blocks_json, primary_score,
      total_duration_min, tags_json, notes, rpe, parse_confidence
    )
    VALUES (NULL, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
    "#,
  )
  .bind(w.workout_date)
  .bind(&w.input_text)
  .bind(&w.blocks_json)
  .bind(&w.primary_score)
  .bind(w.total_duration_min)
  .bind(&w.tags_json)
  .bind(&w.notes)
  .bind(w.rpe)
  .bind(w.parse_confidence)
  .execute(&mut *tx)
  .await?
  .last_insert_rowid();

  for score in &record.block_scores {
    sqlx::query(
      r#"
      INSERT INTO block_scores (
        workout_id, block_type, block_title, rounds_completed, extra_reps,
        time_s, total_reps, tonnage_lb, rx_status, is_pr
      )
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
      "#,
    )
    .bind(workout_id)
    .bind(&score.block_type)
    .bind(&score.block_title)
    .bind(score.rounds_completed)
    .bind(score.extra_reps)
    .bind(score.time_s)
    .bind(score.total_reps)
    .bind(score.tonnage_lb)
    .bind(&score.rx_status)
    .bind(score.is_pr)
    .execute(&mut *tx)
    .await?;
  }

  for movement in &record.movements {
    sqlx::query(
      r#"
      INSERT INTO movements (
        canonical_name, category, movement_pattern, aliases_json,
        equipment_json, rx_standards_json, parameter_schema_json
      )
      VALUES (?1, ?2, ?3, ?4, '[]', '{}', '{"reps":true}')
      ON CONFLICT(canonical_name) DO UPDATE SET
        category = excluded.category,
        movement_pattern = excluded.movement_pattern
      "#,
    )
    .bind(&movement.canonical_name)
    .bind(&movement.category)
    .bind(&movement.movement_pattern)
    .bind(&movement.aliases_json)
    .execute(&mut *tx)
    .await?;
  }

  for pr in &record.benchmark_prs {
    sqlx::query(
      r#"
      INSERT INTO benchmark_prs (
        user_id, benchmark_name, date, score_value, score_display,
        rx_status, workout_id
      )
      VALUES (NULL, ?1, ?2, ?3, ?4, ?5, ?6)
      "#,
    )
    .bind(&pr.benchmark_name)
    .bind(pr.date)
    .bind(pr.score_value)
    .bind(&pr.score_display)
    .bind(&pr.rx_status)
    .bind(workout_id)
    .execute(&mut *tx)
    .await?;
  }

  tx.commit().await?;
  Ok(workout_id)
}

/// ---------------------------------------------------------------------------
/// Reads
/// ---------------------------------------------------------------------------

pub async fn count_workouts(pool: &SqlitePool) -> Result<i64, StoreError> {
  let count = sqlx::query_scalar("SELECT COUNT(*) FROM workouts")
    .fetch_one(pool)
    .await?;
  Ok(count)
}

pub async fn count_workouts_since(pool: &SqlitePool, since: NaiveDate) -> Result<i64, StoreError> {
  let count = sqlx::query_scalar("SELECT COUNT(*) FROM workouts WHERE workout_date >= ?1")
    .bind(since)
    .fetch_one(pool)
    .await?;
  Ok(count)
}

/// `(block_type, workout_id)` for block scores recorded on or after `since`.
pub async fn block_types_since(
  pool: &SqlitePool,
  since: NaiveDate,
) -> Result<Vec<(String, i64)>, StoreError> {
  let rows = sqlx::query_as("SELECT block_type, workout_id FROM block_scores WHERE created_at >= ?1")
    .bind(since)
    .fetch_all(pool)
    .await?;
  Ok(rows)
}

/// Summaries of workouts on or after `since`, newest first.
pub async fn workout_summaries_since(
  pool: &SqlitePool,
  since: NaiveDate,
) -> Result<Vec<WorkoutSummary>, StoreError> {
  let rows = sqlx::query_as::<_, WorkoutSummary>(
    r#"
    SELECT workout_date, input_text, primary_score
    FROM workouts
    WHERE workout_date >= ?1
    ORDER BY workout_date DESC, id DESC
    "#,
  )
  .bind(since)
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

/// All benchmark PRs, newest first.
pub async fn benchmark_prs(pool: &SqlitePool) -> Result<Vec<BenchmarkPr>, StoreError> {
  let rows = sqlx::query_as::<_, BenchmarkPr>(
    r#"
    SELECT benchmark_name, date, score_value, score_display, rx_status
    FROM benchmark_prs
    ORDER BY date DESC, id DESC
    "#,
  )
  .fetch_all(pool)
  .await?;
  Ok(rows)
}

pub async fn recent_workouts(pool: &SqlitePool, limit: i64) -> Result<Vec<Workout>, StoreError> {
  let rows = sqlx::query_as::<_, Workout>(
    "SELECT * FROM workouts ORDER BY workout_date DESC, id DESC LIMIT ?1",
  )
  .bind(limit)
  .fetch_all(pool)
  .await?;
  Ok(rows)
}
