//! Single-line CSV tokenizer for the planning-sheet export.

/// Split one line of CSV text into trimmed cells.
///
/// A double quote toggles quoted mode; commas inside quoted mode are kept as
/// text. Quote characters themselves are dropped. An unterminated quote keeps
/// the rest of the line inside the current cell.
pub fn parse_csv_line(line: &str) -> Vec<String> {
  let mut cells = Vec::new();
  let mut current = String::new();
  let mut in_quotes = false;

  for ch in line.chars() {
    match ch {
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => {
        cells.push(current.trim().to_string());
        current.clear();
      }
      _ => current.push(ch),
    }
  }

  cells.push(current.trim().to_string());
  cells
}
