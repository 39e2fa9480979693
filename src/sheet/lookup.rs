//! Week-block lookup over the planning-sheet export.
//!
//! The sheet is a stack of week blocks. Each block starts with a header row
//! whose cells are dates (one per weekday column); the rows beneath it hold
//! that week's programming, column by column, until the next header row.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

use super::csv_line::parse_csv_line;
use super::dates::normalize_date;

/// Range hint returned when a requested date is not in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AvailableDates {
  pub first: Option<String>,
  pub last: Option<String>,
  /// Every distinct header date, ascending.
  pub all: Vec<String>,
}

impl AvailableDates {
  fn from_seen(seen: BTreeSet<String>) -> Self {
    let all: Vec<String> = seen.into_iter().collect();
    Self {
      first: all.first().cloned(),
      last: all.last().cloned(),
      all,
    }
  }
}

/// Outcome of looking up one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetLookup {
  /// Newline-joined workout cells for the date.
  Found { workout: String },
  /// No header row carries the date.
  NotFound { available: AvailableDates },
  /// The date has a block, but its column is empty.
  NoContent,
}

/// Position of the header cell chosen for the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeaderMatch {
  row: usize,
  column: usize,
}

#[derive(Debug, Default)]
struct HeaderScan {
  matched: Option<HeaderMatch>,
  seen: BTreeSet<String>,
}

/// Split the export into non-blank rows of cells.
pub fn parse_rows(csv_text: &str) -> Vec<Vec<String>> {
  csv_text
    .split('\n')
    .filter(|line| !line.trim().is_empty())
    .map(parse_csv_line)
    .collect()
}

/// A header row is any row with at least one date cell.
pub fn is_header_row(cells: &[String]) -> bool {
  cells.iter().any(|cell| normalize_date(cell).is_some())
}

/// Record every date seen and the last position holding `target`.
///
/// Later matches overwrite earlier ones: when a date repeats across weeks
/// the most recently added block wins.
fn scan_headers(rows: &[Vec<String>], target: &str) -> HeaderScan {
  let mut scan = HeaderScan::default();

  for (row, cells) in rows.iter().enumerate() {
    for (column, cell) in cells.iter().enumerate() {
      let Some(date) = normalize_date(cell) else {
        continue;
      };
      if date == target {
        scan.matched = Some(HeaderMatch { row, column });
      }
      scan.seen.insert(date);
    }
  }

  scan
}

/// Cells under the matched header, up to the next header row.
fn collect_block(rows: &[Vec<String>], header: HeaderMatch) -> Vec<String> {
  rows
    .iter()
    .skip(header.row + 1)
    .take_while(|cells| !is_header_row(cells))
    .filter_map(|cells| cells.get(header.column))
    .map(|cell| cell.trim())
    .filter(|cell| !cell.is_empty())
    .map(str::to_string)
    .collect()
}

/// Find the programmed workout for `target_date` (`YYYY-MM-DD`).
pub fn find_workout(csv_text: &str, target_date: &str) -> SheetLookup {
  let rows = parse_rows(csv_text);
  let scan = scan_headers(&rows, target_date);

  debug!(
    target_date,
    rows = rows.len(),
    dates_seen = scan.seen.len(),
    "scanned sheet headers"
  );

  let Some(header) = scan.matched else {
    return SheetLookup::NotFound {
      available: AvailableDates::from_seen(scan.seen),
    };
  };

  debug!(row = header.row, column = header.column, "using header cell");

  let lines = collect_block(&rows, header);
  if lines.is_empty() {
    return SheetLookup::NoContent;
  }

  SheetLookup::Found {
    workout: lines.join("\n"),
  }
}
