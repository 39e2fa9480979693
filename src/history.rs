//! Natural-language questions over recent workout history.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::llm::{LanguageModel, LlmError};
use crate::models::{BenchmarkPr, WorkoutSummary};
use crate::store::{benchmark_prs, workout_summaries_since, StoreError};

const HISTORY_WINDOW_MONTHS: u32 = 6;
const INPUT_PREVIEW_CHARS: usize = 400;
const QUERY_MAX_TOKENS: u32 = 2000;

/// Rows handed to the model alongside the question.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryContext {
  pub parsed_workouts: Vec<WorkoutSummary>,
  pub benchmark_prs: Vec<BenchmarkPr>,
}

/// First day of the history window ending at `today`.
pub fn window_start(today: NaiveDate) -> NaiveDate {
  today
    .checked_sub_months(Months::new(HISTORY_WINDOW_MONTHS))
    .unwrap_or(NaiveDate::MIN)
}

fn preview(text: &str) -> String {
  text.chars().take(INPUT_PREVIEW_CHARS).collect()
}

/// Load the last six months of workouts (newest first) and every benchmark PR.
pub async fn load_context(pool: &SqlitePool, today: NaiveDate) -> Result<HistoryContext, StoreError> {
  let parsed_workouts = workout_summaries_since(pool, window_start(today))
    .await?
    .into_iter()
    .map(|summary| WorkoutSummary {
      input_text: preview(&summary.input_text),
      ..summary
    })
    .collect();

  Ok(HistoryContext {
    parsed_workouts,
    benchmark_prs: benchmark_prs(pool).await?,
  })
}

fn build_user_message(question: &str, context: &HistoryContext) -> String {
  let data = serde_json::to_string_pretty(context).unwrap_or_default();

  format!(
    r#"Question: {}

Workout Data:
{}

Analyze the data and provide a conversational answer."#,
    question, data
  )
}

/// Answer `question` from the supplied history.
pub async fn answer_question(
  llm: &dyn LanguageModel,
  question: &str,
  context: &HistoryContext,
) -> Result<String, LlmError> {
  let system_prompt = include_str!("prompts/history_system.txt");
  let user_message = build_user_message(question, context);

  tracing::debug!(
    workouts = context.parsed_workouts.len(),
    prs = context.benchmark_prs.len(),
    "asking history question"
  );

  let (answer, _usage) = llm
    .complete(system_prompt, &user_message, QUERY_MAX_TOKENS)
    .await?;
  Ok(answer)
}
