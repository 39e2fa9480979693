//! HTTP surface. Every handler takes the shared [`AppState`] and answers JSON.

pub mod dashboard;
pub mod query;
pub mod sheet;
pub mod workouts;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

use crate::db::AppState;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/api/workouts", get(workouts::get_workout_for_date))
    .route("/api/workouts/recent", get(workouts::get_recent_workouts))
    .route("/api/test-sheet", get(sheet::test_sheet))
    .route("/api/parse-workout", post(workouts::parse_workout))
    .route("/api/query", post(query::query_history))
    .route("/api/dashboard-stats", get(dashboard::dashboard_stats))
    .with_state(state)
}
