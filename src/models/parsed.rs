//! Structured workout record returned by the parsing model.

use serde::{Deserialize, Serialize};

/// Closed set of block kinds the parser may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
  Amrap,
  ForTime,
  Strength,
  Cardio,
  Emom,
}

impl BlockType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Amrap => "AMRAP",
      Self::ForTime => "FOR_TIME",
      Self::Strength => "STRENGTH",
      Self::Cardio => "CARDIO",
      Self::Emom => "EMOM",
    }
  }
}

impl std::fmt::Display for BlockType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scoring {
  RoundsPlusReps,
  Time,
  Load,
  Reps,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreModel {
  pub scoring: Scoring,
  /// Reps in one full round, for rounds-plus-reps scoring.
  #[serde(default)]
  pub round_rep_bundle: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
  pub value: f64,
  pub unit: String,
}

/// Prescribed or performed parameters of one movement event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovementParams {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reps: Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub load: Option<Load>,
  /// Anything else the model chose to record (distance, calories, ...).
  #[serde(flatten)]
  pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementEvent {
  pub movement_name: String,
  #[serde(default)]
  pub prescribed: Option<MovementParams>,
  #[serde(default)]
  pub performed: Option<MovementParams>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
  #[serde(default)]
  pub rounds: Option<i64>,
  #[serde(default)]
  pub events: Vec<MovementEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockScore {
  #[serde(default)]
  pub rounds_completed: Option<i64>,
  #[serde(default)]
  pub extra_reps: Option<i64>,
  #[serde(default)]
  pub total_reps: Option<i64>,
  #[serde(default)]
  pub time_s: Option<i64>,
  #[serde(default)]
  pub tonnage_lb: Option<f64>,
  #[serde(default)]
  pub rx_status: Option<String>,
  #[serde(default)]
  pub is_pr: Option<bool>,
}

impl BlockScore {
  pub fn is_pr(&self) -> bool {
    self.is_pr.unwrap_or(false)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
  pub block_type: BlockType,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub time_cap_s: Option<i64>,
  #[serde(default)]
  pub score_model: Option<ScoreModel>,
  #[serde(default)]
  pub segments: Vec<Segment>,
  #[serde(default)]
  pub block_score: Option<BlockScore>,
}

impl Block {
  /// Title with surrounding whitespace removed, if it has any text.
  pub fn title(&self) -> Option<&str> {
    self
      .title
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
  }

  pub fn movement_names(&self) -> impl Iterator<Item = &str> {
    self
      .segments
      .iter()
      .flat_map(|segment| segment.events.iter())
      .map(|event| event.movement_name.trim())
      .filter(|name| !name.is_empty())
  }
}

/// Full parse of one free-text workout log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedWorkout {
  #[serde(default)]
  pub blocks: Vec<Block>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub notes: Option<String>,
  /// Perceived exertion, 1-10.
  #[serde(default)]
  pub rpe: Option<f64>,
}
