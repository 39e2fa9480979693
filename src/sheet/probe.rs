//! Reachability check for the sheet export.

use serde::Serialize;

const SAMPLE_ROWS: usize = 5;

/// First-look summary of the raw export, used to confirm the sheet is shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProbe {
  pub success: bool,
  pub sheet_id: String,
  pub headers: Vec<String>,
  pub sample_rows: Vec<String>,
  pub total_lines: usize,
  pub message: String,
}

impl SheetProbe {
  pub fn from_csv(sheet_id: &str, csv_text: &str) -> Self {
    let lines: Vec<&str> = csv_text.split('\n').collect();

    let headers = lines
      .first()
      .map(|line| {
        line
          .split(',')
          .map(|cell| cell.trim().replace('"', ""))
          .collect()
      })
      .unwrap_or_default();

    let sample_rows = lines
      .iter()
      .skip(1)
      .take(SAMPLE_ROWS)
      .map(|line| line.to_string())
      .collect();

    Self {
      success: true,
      sheet_id: sheet_id.to_string(),
      headers,
      sample_rows,
      total_lines: lines.len(),
      message: "Sheet is accessible!".to_string(),
    }
  }
}
