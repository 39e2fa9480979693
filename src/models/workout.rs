use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Workout {
  pub id: i64,
  pub user_id: Option<String>,
  pub workout_date: NaiveDate,
  pub input_text: String,
  pub blocks_json: String,
  pub primary_score: Option<String>,
  pub total_duration_min: Option<i64>,
  pub tags_json: String,
  pub notes: Option<String>,
  pub rpe: Option<f64>,
  pub parse_confidence: Option<f64>,
  pub created_at: Option<NaiveDateTime>,
}

/// For inserting new workouts (without id, created_at)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkout {
  pub workout_date: NaiveDate,
  pub input_text: String,
  pub blocks_json: String,
  pub primary_score: String,
  pub total_duration_min: Option<i64>,
  pub tags_json: String,
  pub notes: Option<String>,
  pub rpe: Option<f64>,
  pub parse_confidence: Option<f64>,
}

/// Compact row sent to the history assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSummary {
  #[serde(rename = "date")]
  pub workout_date: NaiveDate,
  pub input_text: String,
  pub primary_score: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlockScoreRow {
  pub id: i64,
  pub workout_id: i64,
  pub block_type: String,
  pub block_title: Option<String>,
  pub rounds_completed: Option<i64>,
  pub extra_reps: Option<i64>,
  pub time_s: Option<i64>,
  pub total_reps: Option<i64>,
  pub tonnage_lb: Option<f64>,
  pub rx_status: Option<String>,
  pub is_pr: bool,
  pub created_at: Option<NaiveDateTime>,
}

/// For inserting block scores; the workout id is assigned on insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBlockScore {
  pub block_type: String,
  pub block_title: Option<String>,
  pub rounds_completed: Option<i64>,
  pub extra_reps: Option<i64>,
  pub time_s: Option<i64>,
  pub total_reps: Option<i64>,
  pub tonnage_lb: Option<f64>,
  pub rx_status: Option<String>,
  pub is_pr: bool,
}
