//! Programmed-workout lookup and workout logging.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::AppState;
use crate::error::ApiError;
use crate::logbook::log_workout;
use crate::models::{ParsedWorkout, Workout};
use crate::sheet::{find_workout, normalize_date, AvailableDates, SheetLookup};
use crate::store::recent_workouts;

const RECENT_LIMIT: i64 = 50;

/// ---------------------------------------------------------------------------
/// Sheet Lookup
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LookupParams {
  pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLookupResponse {
  pub workout: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  pub found: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub available_dates: Option<AvailableDates>,
}

impl WorkoutLookupResponse {
  pub fn from_lookup(requested: &str, lookup: SheetLookup) -> Self {
    match lookup {
      SheetLookup::Found { workout } => Self {
        workout: Some(workout),
        date: Some(requested.to_string()),
        message: None,
        found: true,
        available_dates: None,
      },
      SheetLookup::NotFound { available } => Self {
        workout: None,
        date: None,
        message: Some(format!(
          "No workout found for {}. Available dates: {} to {}",
          requested,
          available.first.as_deref().unwrap_or("none"),
          available.last.as_deref().unwrap_or("none"),
        )),
        found: false,
        available_dates: Some(available),
      },
      SheetLookup::NoContent => Self {
        workout: None,
        date: None,
        message: Some("No workout content for this date".to_string()),
        found: false,
        available_dates: None,
      },
    }
  }
}

/// `GET /api/workouts?date=YYYY-MM-DD`
pub async fn get_workout_for_date(
  State(state): State<Arc<AppState>>,
  Query(params): Query<LookupParams>,
) -> Result<Json<WorkoutLookupResponse>, ApiError> {
  let requested = params
    .date
    .filter(|d| !d.trim().is_empty())
    .ok_or_else(|| ApiError::validation("Date parameter required"))?;

  let target = normalize_date(&requested)
    .ok_or_else(|| ApiError::validation(format!("Unrecognized date: {}", requested)))?;

  let csv_text = state.sheets.fetch_csv().await?;
  let lookup = find_workout(&csv_text, &target);

  tracing::info!(
    date = %target,
    found = matches!(lookup, SheetLookup::Found { .. }),
    "sheet lookup"
  );

  Ok(Json(WorkoutLookupResponse::from_lookup(&requested, lookup)))
}

/// `GET /api/workouts/recent`
pub async fn get_recent_workouts(
  State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Workout>>, ApiError> {
  Ok(Json(recent_workouts(&state.db, RECENT_LIMIT).await?))
}

/// ---------------------------------------------------------------------------
/// Workout Logging
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ParseWorkoutRequest {
  pub text: Option<String>,
  pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWorkoutResponse {
  pub success: bool,
  pub workout_id: i64,
  pub primary_score: String,
  pub parsed: ParsedWorkout,
}

fn resolve_log_date(date: Option<&str>) -> Result<NaiveDate, ApiError> {
  let Some(raw) = date.filter(|d| !d.trim().is_empty()) else {
    return Ok(Local::now().date_naive());
  };

  normalize_date(raw)
    .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
    .ok_or_else(|| ApiError::validation(format!("Unrecognized date: {}", raw)))
}

/// `POST /api/parse-workout`
pub async fn parse_workout(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<ParseWorkoutRequest>, JsonRejection>,
) -> Result<Json<ParseWorkoutResponse>, ApiError> {
  let Json(request) = payload?;
  let text = request
    .text
    .filter(|t| !t.trim().is_empty())
    .ok_or_else(|| ApiError::validation("Workout text is required"))?;
  let date = resolve_log_date(request.date.as_deref())?;

  let logged = log_workout(&state.db, state.llm.as_ref(), &text, date).await?;

  Ok(Json(ParseWorkoutResponse {
    success: true,
    workout_id: logged.workout_id,
    primary_score: logged.primary_score,
    parsed: logged.parsed,
  }))
}
