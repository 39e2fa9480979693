//! Score formatting and keyword classification for parsed workouts.

use crate::models::{Block, BlockScore, Scoring};

const NO_SCORE: &str = "Workout logged";

/// Named "girl" benchmarks tracked as personal records.
const KNOWN_BENCHMARKS: &[&str] = &[
  "fran", "grace", "helen", "diane", "elizabeth", "annie", "eva", "kelly", "cindy", "mary",
  "barbara", "jackie", "karen", "lynne", "nancy", "amanda",
];

/// Format seconds as `M:SS`.
pub fn format_duration(seconds: i64) -> String {
  format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// One-line headline score for a whole session, e.g. `Fran: 4:12 RX | 5x5 Back Squat: 2250 lb`.
pub fn primary_score(blocks: &[Block]) -> String {
  let scores: Vec<String> = blocks
    .iter()
    .filter_map(|block| {
      let score = block.block_score.as_ref()?;
      let text = block_score_text(block.title(), score);
      (!text.is_empty()).then_some(text)
    })
    .collect();

  if scores.is_empty() {
    NO_SCORE.to_string()
  } else {
    scores.join(" | ")
  }
}

fn block_score_text(title: Option<&str>, score: &BlockScore) -> String {
  let mut text = title.map(|t| format!("{}: ", t)).unwrap_or_default();
  let rx_suffix = score
    .rx_status
    .as_deref()
    .filter(|rx| !rx.is_empty())
    .map(|rx| format!(" {}", rx))
    .unwrap_or_default();

  if let Some(rounds) = score.rounds_completed {
    text.push_str(&format!("{}+{}{}", rounds, score.extra_reps.unwrap_or(0), rx_suffix));
  } else if let Some(time_s) = score.time_s.filter(|t| *t != 0) {
    text.push_str(&format!("{}{}", format_duration(time_s), rx_suffix));
  } else if let Some(tonnage) = score.tonnage_lb.filter(|t| *t != 0.0) {
    text.push_str(&format!("{} lb", tonnage));
  } else if let Some(reps) = score.total_reps.filter(|r| *r != 0) {
    text.push_str(&format!("{} reps", reps));
  }

  text
}

pub fn is_known_benchmark(title: &str) -> bool {
  let title = title.trim().to_lowercase();
  KNOWN_BENCHMARKS.contains(&title.as_str())
}

/// Comparable numeric value of a score: time, else rounds.reps, else reps, else load.
pub fn score_value(score: &BlockScore) -> Option<f64> {
  if let Some(time_s) = score.time_s.filter(|t| *t != 0) {
    return Some(time_s as f64);
  }
  if let Some(rounds) = score.rounds_completed {
    return Some(rounds as f64 + score.extra_reps.unwrap_or(0) as f64 / 100.0);
  }
  if let Some(reps) = score.total_reps.filter(|r| *r != 0) {
    return Some(reps as f64);
  }
  score.tonnage_lb.filter(|t| *t != 0.0)
}

/// Display form of a benchmark score.
pub fn score_display(score: &BlockScore, scoring: Option<Scoring>) -> String {
  if let Some(time_s) = score.time_s.filter(|t| *t != 0) {
    return format_duration(time_s);
  }
  if scoring == Some(Scoring::RoundsPlusReps) {
    return format!(
      "{}+{}",
      score.rounds_completed.unwrap_or(0),
      score.extra_reps.unwrap_or(0)
    );
  }
  if let Some(reps) = score.total_reps.filter(|r| *r != 0) {
    return format!("{} reps", reps);
  }
  if let Some(tonnage) = score.tonnage_lb.filter(|t| *t != 0.0) {
    return format!("{} lb", tonnage);
  }
  "completed".to_string()
}

/// ---------------------------------------------------------------------------
/// Movement Classification
/// ---------------------------------------------------------------------------

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
  needles.iter().any(|n| haystack.contains(n))
}

/// Broad movement pattern (squat, hinge, push, pull, ...).
pub fn movement_pattern(movement_name: &str) -> &'static str {
  let name = movement_name.to_lowercase();

  if name.contains("squat") {
    "squat"
  } else if name.contains("deadlift") {
    "hinge"
  } else if contains_any(&name, &["press", "jerk"]) {
    "push"
  } else if contains_any(&name, &["pull", "chin"]) {
    "pull"
  } else if contains_any(&name, &["row", "bike", "run"]) {
    "monostructural"
  } else if contains_any(&name, &["clean", "snatch", "burpee", "thruster"]) {
    "mixed"
  } else {
    "gymnastics"
  }
}

/// Catalog category, upper-cased as stored.
pub fn movement_category(movement_name: &str) -> &'static str {
  let name = movement_name.to_lowercase();

  if contains_any(&name, &["row", "bike", "run"]) {
    "MONOSTRUCTURAL"
  } else if contains_any(
    &name,
    &["clean", "snatch", "jerk", "squat", "deadlift", "press"],
  ) {
    "WEIGHTLIFTING"
  } else {
    "GYMNASTICS"
  }
}
