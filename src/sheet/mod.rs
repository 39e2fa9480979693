//! Planning-sheet access: fetching the CSV export and finding the workout
//! programmed for a given day.

mod csv_line;
mod dates;
mod lookup;
mod probe;
mod source;

pub use csv_line::parse_csv_line;
pub use dates::normalize_date;
pub use lookup::{find_workout, is_header_row, parse_rows, AvailableDates, SheetLookup};
pub use probe::SheetProbe;
pub use source::{build_export_url, GoogleSheetSource, SheetError, SheetSource};
