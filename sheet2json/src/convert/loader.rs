//! Open a workbook and read its config sheet

use std::path::Path;

use calamine::{Reader, open_workbook_auto};

use super::error::ConvertError;
use super::layout::{Grid, Shape, cell, cols, grid_from_range, rows};

/// A config sheet with its metadata resolved
#[derive(Debug, Clone)]
pub struct LoadedSheet {
    /// Base name of the JSON file to write (cell B1)
    pub output_name: String,
    /// Record shape (cell B2)
    pub shape: Shape,
    /// Full worksheet content
    pub grid: Grid,
}

/// Read `sheet_name` from the workbook at `path`
///
/// The workbook is closed before this returns, whether or not reading
/// succeeded.
pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<LoadedSheet, ConvertError> {
    let grid = {
        let mut workbook = open_workbook_auto(path).map_err(ConvertError::Open)?;
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|source| ConvertError::CellRead {
                sheet: sheet_name.to_string(),
                source,
            })?;
        grid_from_range(&range)
    };

    let label = cell(&grid, rows::SHAPE, cols::METADATA);
    let shape = Shape::from_label(label).ok_or_else(|| ConvertError::UnsupportedShape {
        label: label.to_string(),
    })?;

    let output_name = cell(&grid, rows::OUTPUT_NAME, cols::METADATA).to_string();
    if output_name.trim().is_empty() {
        return Err(ConvertError::MissingOutputName);
    }

    log::debug!(
        "Loaded '{}' from {}: {} shape, {} rows",
        sheet_name,
        path.display(),
        shape,
        grid.len()
    );

    Ok(LoadedSheet {
        output_name,
        shape,
        grid,
    })
}
