//! Fixed sheet layout and grid extraction
//!
//! Every config sheet carries its metadata in column B of the first two
//! rows. What follows depends on the shape:
//!
//! | Row | List shape        | Single shape            |
//! |-----|-------------------|-------------------------|
//! | 1   | B1: output name   | B1: output name         |
//! | 2   | B2: `列表`        | B2: `单项`              |
//! | 4   | field names       | key / type / value rows |
//! | 5   | field types       | ...                     |
//! | 6+  | one record per row| ...                     |

use calamine::{Data, ExcelDateTime, Range};
use chrono::NaiveTime;

/// Shape label for a list of records
pub const LIST_LABEL: &str = "列表";
/// Shape label for a single key/value record
pub const SINGLE_LABEL: &str = "单项";

/// Row indices (0-based, must match the table above)
pub mod rows {
    pub const OUTPUT_NAME: usize = 0;
    pub const SHAPE: usize = 1;
    pub const LIST_FIELD_NAMES: usize = 3;
    pub const LIST_FIELD_TYPES: usize = 4;
    pub const LIST_DATA: usize = 5;
    pub const SINGLE_DATA: usize = 3;
}

/// Column indices (0-based)
pub mod cols {
    pub const METADATA: usize = 1;
    pub const SINGLE_KEY: usize = 0;
    pub const SINGLE_TYPE: usize = 1;
    pub const SINGLE_VALUE: usize = 2;
}

/// Record shape selected by cell B2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// JSON array of uniformly shaped objects
    List,
    /// One JSON object built from key/type/value rows
    Single,
}

impl Shape {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            LIST_LABEL => Some(Shape::List),
            SINGLE_LABEL => Some(Shape::Single),
            _ => None,
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Shape::List => write!(f, "list"),
            Shape::Single => write!(f, "single"),
        }
    }
}

/// Worksheet content as rows of cell text, addressed from A1
///
/// Each row has trailing empty cells trimmed and trailing empty rows are
/// dropped, so `row.len()` is the number of cells a user filled in.
pub type Grid = Vec<Vec<String>>;

/// Build a [`Grid`] from a calamine range
///
/// calamine ranges start at the first used cell, not at A1, so cells are
/// looked up by absolute position.
pub fn grid_from_range(range: &Range<Data>) -> Grid {
    let Some((end_row, end_col)) = range.end() else {
        return Vec::new();
    };

    let mut grid: Grid = (0..=end_row)
        .map(|r| {
            let mut row: Vec<String> = (0..=end_col)
                .map(|c| range.get_value((r, c)).map(cell_text).unwrap_or_default())
                .collect();
            while row.last().is_some_and(|s| s.is_empty()) {
                row.pop();
            }
            row
        })
        .collect();

    while grid.last().is_some_and(|r| r.is_empty()) {
        grid.pop();
    }
    grid
}

/// Read a cell as text, the way it shows in the sheet
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole numbers are stored as floats in xlsx
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => date_text(dt),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Date cells as ISO text: `2023-03-15`, `2023-03-15 12:00:00` or `18:30:00`
///
/// Durations print as elapsed `[h]:mm:ss`.
fn date_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        let total = (dt.as_f64() * 86_400.0).round() as i64;
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        return format!(
            "{}{}:{:02}:{:02}",
            sign,
            total / 3600,
            total % 3600 / 60,
            total % 60
        );
    }

    let Some(datetime) = dt.as_datetime() else {
        return dt.as_f64().to_string();
    };
    if dt.as_f64().abs() < 1.0 {
        datetime.format("%H:%M:%S").to_string()
    } else if datetime.time() == NaiveTime::MIN {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Cell at (row, col), or "" when absent
pub fn cell(grid: &Grid, row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}
