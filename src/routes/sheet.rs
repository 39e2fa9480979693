use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::db::AppState;
use crate::error::ApiError;
use crate::sheet::SheetProbe;

/// `GET /api/test-sheet`
pub async fn test_sheet(State(state): State<Arc<AppState>>) -> Result<Json<SheetProbe>, ApiError> {
  let csv_text = state.sheets.fetch_csv().await?;
  Ok(Json(SheetProbe::from_csv(state.sheets.sheet_id(), &csv_text)))
}
