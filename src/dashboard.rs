//! Month-to-date training summary.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::{HashMap, HashSet};

use crate::store::{block_types_since, count_workouts, count_workouts_since, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
  Strength,
  Cardio,
  Metcon,
}

/// Classify a block type label by keyword. Anything unrecognized is a metcon.
pub fn categorize_block_type(block_type: &str) -> SessionCategory {
  let label = block_type.to_lowercase();

  if label.contains("strength") || label.contains("lifting") {
    SessionCategory::Strength
  } else if label.contains("cardio") || label.contains("monostructural") {
    SessionCategory::Cardio
  } else {
    // amrap, for_time, emom, tabata, metcon and the rest
    SessionCategory::Metcon
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
  pub total_workouts: i64,
  pub month_to_date: i64,
  pub strength_sessions: usize,
  pub metcons: usize,
  pub cardio: usize,
  /// e.g. "October 2026"
  pub current_month: String,
}

impl DashboardStats {
  /// Category counts are distinct workouts, so a session with two strength
  /// blocks counts once.
  pub fn aggregate(
    total_workouts: i64,
    month_to_date: i64,
    block_types: &[(String, i64)],
    today: NaiveDate,
  ) -> Self {
    let mut sessions: HashMap<SessionCategory, HashSet<i64>> = HashMap::new();
    for (block_type, workout_id) in block_types {
      sessions
        .entry(categorize_block_type(block_type))
        .or_default()
        .insert(*workout_id);
    }
    let count = |category| sessions.get(&category).map_or(0, HashSet::len);

    Self {
      total_workouts,
      month_to_date,
      strength_sessions: count(SessionCategory::Strength),
      metcons: count(SessionCategory::Metcon),
      cardio: count(SessionCategory::Cardio),
      current_month: today.format("%B %Y").to_string(),
    }
  }
}

pub fn month_start(today: NaiveDate) -> NaiveDate {
  today.with_day(1).unwrap_or(today)
}

pub async fn load_dashboard(pool: &SqlitePool, today: NaiveDate) -> Result<DashboardStats, StoreError> {
  let since = month_start(today);
  let total = count_workouts(pool).await?;
  let month = count_workouts_since(pool, since).await?;
  let block_types = block_types_since(pool, since).await?;

  Ok(DashboardStats::aggregate(total, month, &block_types, today))
}
