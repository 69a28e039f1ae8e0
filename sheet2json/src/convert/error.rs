//! Errors raised while converting a single spreadsheet

use std::path::PathBuf;

use thiserror::Error;

use super::coerce::CoerceError;
use super::layout::{LIST_LABEL, SINGLE_LABEL};

/// Failure converting one spreadsheet file
///
/// Row and column numbers are 1-based, as a user sees them in the sheet.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to open workbook: {0}")]
    Open(#[source] calamine::Error),

    #[error("failed to read worksheet '{sheet}': {source}")]
    CellRead {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("unsupported config type '{label}', only \"{}\" and \"{}\" are accepted", LIST_LABEL, SINGLE_LABEL)]
    UnsupportedShape { label: String },

    #[error("output file name (cell B1) is empty")]
    MissingOutputName,

    #[error("malformed header: layout needs at least {required} rows, sheet has {found}")]
    MalformedHeader { required: usize, found: usize },

    #[error("field names ({names}) and field types ({types}) are not aligned")]
    SchemaMismatch { names: usize, types: usize },

    #[error("row {row} column {column}: entry is not aligned with the fields")]
    RowLength { row: usize, column: usize },

    #[error("row {row}: entry needs key, type and value columns")]
    RowTooShort { row: usize },

    #[error("{}: {source}", cell_position(.row, .column))]
    CellConversion {
        row: usize,
        column: Option<usize>,
        #[source]
        source: CoerceError,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn cell_position(row: &usize, column: &Option<usize>) -> String {
    match column {
        Some(column) => format!("row {} column {}", row, column),
        None => format!("row {}", row),
    }
}
