//! Tolerant date recognition for sheet cells.
//!
//! Header rows in the planning sheet carry dates in whatever format the
//! spreadsheet exported them. Everything is mapped to `YYYY-MM-DD` so that a
//! cell can be compared directly against a requested date.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

/// Formats accepted after the fast paths fail.
/// Month and weekday names accept both full and abbreviated spellings.
const DATE_FORMATS: &[&str] = &[
  "%Y-%m-%d",
  "%Y/%m/%d",
  "%m-%d-%Y",
  "%B %d, %Y",
  "%B %d %Y",
  "%d %B %Y",
  "%A, %B %d, %Y",
  "%A %B %d %Y",
  "%A, %d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M:%S",
  "%Y-%m-%d %H:%M",
];

fn iso_date_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static regex"))
}

fn slash_date_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"^([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})$").expect("static regex")
  })
}

/// `M/D/YY` with exactly two year digits. chrono's `%y` alone also takes one
/// digit, which would read a `5/3/1` rep scheme as 2001-05-03.
fn short_year_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"^[0-9]{1,2}/[0-9]{1,2}/[0-9]{2}$").expect("static regex")
  })
}

/// Normalize a cell to `YYYY-MM-DD`, or `None` when it is not a date.
///
/// Never fails: anything unrecognized is simply not a date marker.
pub fn normalize_date(raw: &str) -> Option<String> {
  let cleaned = raw.replace('"', "");
  let cleaned = cleaned.trim();
  if cleaned.is_empty() {
    return None;
  }

  if iso_date_re().is_match(cleaned) {
    return Some(cleaned.to_string());
  }

  if let Some(caps) = slash_date_re().captures(cleaned) {
    return Some(format!("{}-{:0>2}-{:0>2}", &caps[3], &caps[1], &caps[2]));
  }

  if short_year_re().is_match(cleaned) {
    return NaiveDate::parse_from_str(cleaned, "%m/%d/%y")
      .ok()
      .map(|date| date.format("%Y-%m-%d").to_string());
  }

  parse_calendar_date(cleaned).map(|date| date.format("%Y-%m-%d").to_string())
}

/// General-purpose parse. Instants with an explicit offset are read in the
/// local calendar; everything else is already a local date.
///
/// `%Y` accepts any number of digits, so years before 1000 are rejected:
/// rep schemes such as `5-3-1` or `10-8-6` must not become headers.
fn parse_calendar_date(cleaned: &str) -> Option<NaiveDate> {
  parse_any_format(cleaned).filter(|date| date.year() >= 1000)
}

fn parse_any_format(cleaned: &str) -> Option<NaiveDate> {
  if let Ok(instant) = DateTime::parse_from_rfc3339(cleaned) {
    return Some(instant.with_timezone(&Local).date_naive());
  }
  if let Ok(instant) = DateTime::parse_from_rfc2822(cleaned) {
    return Some(instant.with_timezone(&Local).date_naive());
  }

  DATETIME_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(cleaned, fmt).ok())
    .map(|dt| dt.date())
    .or_else(|| {
      DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cleaned, fmt).ok())
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_iso_date_is_idempotent() {
    for date in ["2025-07-28", "1999-12-31", "2026-10-19"] {
      let once = normalize_date(date).unwrap();
      assert_eq!(once, date);
      assert_eq!(normalize_date(&once).unwrap(), once);
    }
  }

  #[test]
  fn test_slash_date_is_zero_padded() {
    assert_eq!(normalize_date("7/28/2025").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("12/1/2025").as_deref(), Some("2025-12-01"));
    assert_eq!(normalize_date("01/02/2026").as_deref(), Some("2026-01-02"));
  }

  #[test]
  fn test_quotes_and_whitespace_are_stripped() {
    assert_eq!(normalize_date(" \"7/29/2025\" ").as_deref(), Some("2025-07-29"));
    assert_eq!(normalize_date("\"2025-07-28\"\r").as_deref(), Some("2025-07-28"));
  }

  #[test]
  fn test_month_name_formats() {
    assert_eq!(normalize_date("July 28, 2025").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("Jul 28 2025").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("Monday, July 28, 2025").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("28 Jul 2025").as_deref(), Some("2025-07-28"));
  }

  #[test]
  fn test_other_numeric_formats() {
    assert_eq!(normalize_date("2025/7/28").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("2025-7-8").as_deref(), Some("2025-07-08"));
    assert_eq!(normalize_date("7/28/25").as_deref(), Some("2025-07-28"));
    assert_eq!(normalize_date("12/01/26").as_deref(), Some("2026-12-01"));
    assert_eq!(normalize_date("2025-07-28 06:30:00").as_deref(), Some("2025-07-28"));
  }

  #[test]
  fn test_offset_instant_uses_local_calendar() {
    let expected = DateTime::parse_from_rfc3339("2025-07-28T12:00:00Z")
      .unwrap()
      .with_timezone(&Local)
      .format("%Y-%m-%d")
      .to_string();
    assert_eq!(normalize_date("2025-07-28T12:00:00Z"), Some(expected));
  }

  #[test]
  fn test_non_dates_are_rejected() {
    for cell in ["", "   ", "\"\"", "TBD", "Murph", "5x5 Back Squat", "Rest Day", "21-15-9", "400",
      "5-3-1", "10-8-6", "3-2-1", "5/3/1", "5/3/10/1"] {
      assert_eq!(normalize_date(cell), None, "{:?} should not be a date", cell);
    }
  }
}
