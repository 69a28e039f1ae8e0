//! Spreadsheet to JSON conversion
//!
//! A config sheet is loaded into a text grid, then parsed according to the
//! shape named in cell B2. Cell text is coerced by the type label declared
//! for its column (list shape) or row (single shape).

mod coerce;
mod error;
mod layout;
mod list;
mod loader;
mod single;

use serde_json::Value;

pub use coerce::Strictness;
pub use error::ConvertError;
pub use layout::Shape;
pub use loader::{LoadedSheet, load_sheet};

use list::parse_list;
use single::parse_single;

/// Parse a loaded sheet into its JSON value
pub fn convert_sheet(sheet: &LoadedSheet, strictness: Strictness) -> Result<Value, ConvertError> {
    match sheet.shape {
        Shape::List => parse_list(&sheet.grid, strictness),
        Shape::Single => parse_single(&sheet.grid, strictness),
    }
}
