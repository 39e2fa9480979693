use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BenchmarkPr {
  pub benchmark_name: String,
  pub date: NaiveDate,
  pub score_value: Option<f64>,
  pub score_display: String,
  pub rx_status: String,
}

/// For inserting new PRs; the workout id is assigned on insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBenchmarkPr {
  pub benchmark_name: String,
  pub date: NaiveDate,
  pub score_value: Option<f64>,
  pub score_display: String,
  pub rx_status: String,
}
