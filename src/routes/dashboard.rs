use axum::extract::State;
use axum::Json;
use chrono::Local;
use std::sync::Arc;

use crate::dashboard::{load_dashboard, DashboardStats};
use crate::db::AppState;
use crate::error::ApiError;

/// `GET /api/dashboard-stats`
pub async fn dashboard_stats(
  State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
  Ok(Json(load_dashboard(&state.db, Local::now().date_naive()).await?))
}
