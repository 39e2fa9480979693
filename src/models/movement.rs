use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movement {
  pub id: i64,
  pub canonical_name: String,
  pub category: String,
  pub movement_pattern: String,
  pub aliases_json: String,
}

/// Catalog entry derived from a parsed movement name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMovement {
  pub canonical_name: String,
  pub category: String,
  pub movement_pattern: String,
  pub aliases_json: String,
}
