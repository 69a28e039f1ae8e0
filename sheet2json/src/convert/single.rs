//! Single shape: one JSON object from key/type/value rows

use serde_json::{Map, Value};

use super::coerce::{Strictness, coerce};
use super::error::ConvertError;
use super::layout::{Grid, cols, rows};

/// Parse a single-shaped grid into a JSON object
///
/// A repeated key keeps its first position but takes the later value.
pub fn parse_single(grid: &Grid, strictness: Strictness) -> Result<Value, ConvertError> {
    let mut record = Map::new();

    for (row_idx, row) in grid.iter().enumerate().skip(rows::SINGLE_DATA) {
        let row_num = row_idx + 1;

        if row.len() <= cols::SINGLE_VALUE {
            return Err(ConvertError::RowTooShort { row: row_num });
        }

        let key = &row[cols::SINGLE_KEY];
        let value = coerce(&row[cols::SINGLE_VALUE], &row[cols::SINGLE_TYPE], strictness)
            .map_err(|source| ConvertError::CellConversion {
                row: row_num,
                column: None,
                source,
            })?;

        if record.insert(key.clone(), value).is_some() {
            log::debug!("Row {}: key '{}' overrides an earlier row", row_num, key);
        }
    }

    Ok(Value::Object(record))
}
