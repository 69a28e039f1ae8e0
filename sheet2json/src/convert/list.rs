//! List shape: one JSON object per data row

use serde_json::{Map, Value};

use super::coerce::{Strictness, coerce};
use super::error::ConvertError;
use super::layout::{Grid, rows};

/// Rows needed before the first data row can be read
const REQUIRED_ROWS: usize = rows::LIST_FIELD_TYPES + 1;

/// Parse a list-shaped grid into a JSON array
pub fn parse_list(grid: &Grid, strictness: Strictness) -> Result<Value, ConvertError> {
    if grid.len() < REQUIRED_ROWS {
        return Err(ConvertError::MalformedHeader {
            required: REQUIRED_ROWS,
            found: grid.len(),
        });
    }

    let fields = &grid[rows::LIST_FIELD_NAMES];
    let types = &grid[rows::LIST_FIELD_TYPES];
    let field_len = fields.len();
    if field_len != types.len() {
        return Err(ConvertError::SchemaMismatch {
            names: field_len,
            types: types.len(),
        });
    }

    let mut records = Vec::with_capacity(grid.len() - rows::LIST_DATA);
    for (row_idx, row) in grid.iter().enumerate().skip(rows::LIST_DATA) {
        let row_num = row_idx + 1; // 1-based for error messages

        if row.len() != field_len {
            // Reports the column after the last filled cell
            return Err(ConvertError::RowLength {
                row: row_num,
                column: row.len() + 1,
            });
        }

        let mut record = Map::with_capacity(field_len);
        for (col, ((text, name), label)) in row.iter().zip(fields).zip(types).enumerate() {
            let value = coerce(text, label, strictness).map_err(|source| {
                ConvertError::CellConversion {
                    row: row_num,
                    column: Some(col + 1),
                    source,
                }
            })?;
            record.insert(name.clone(), value);
        }
        records.push(Value::Object(record));
    }

    Ok(Value::Array(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::coerce::CoerceError;
    use serde_json::json;

    /// Metadata rows plus the given schema and data rows
    fn sheet(body: &[&[&str]]) -> Grid {
        let mut grid: Grid = vec![
            vec!["name".into(), "heroes".into()],
            vec!["type".into(), "列表".into()],
            vec![],
        ];
        grid.extend(body.iter().map(|r| r.iter().map(|s| s.to_string()).collect()));
        grid
    }

    #[test]
    fn test_single_record() {
        let g = sheet(&[&["id", "name"], &["int", "string"], &["1", "Alice"]]);

        let value = parse_list(&g, Strictness::Permissive).unwrap();

        assert_eq!(value, json!([{"id": 1, "name": "Alice"}]));
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[{"id":1,"name":"Alice"}]"#
        );
    }

    #[test]
    fn test_records_keep_field_order() {
        let g = sheet(&[
            &["z", "a", "m"],
            &["int", "float", "string"],
            &["1", "2.5", "x"],
            &["2", "0", "y"],
        ]);

        let value = parse_list(&g, Strictness::Permissive).unwrap();

        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 2);
        let keys: Vec<_> = records[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(records[1]["a"], json!(0.0));
    }

    #[test]
    fn test_no_data_rows_is_empty_array() {
        let g = sheet(&[&["id"], &["int"]]);

        let value = parse_list(&g, Strictness::Permissive).unwrap();

        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_schema_mismatch_fails_before_data() {
        // The data row would fail on its own, but the schema check comes first
        let g = sheet(&[&["id", "name"], &["int"], &["not a number"]]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        assert!(matches!(err, ConvertError::SchemaMismatch { names: 2, types: 1 }));
    }

    #[test]
    fn test_short_row_reports_next_column() {
        let g = sheet(&[
            &["id", "name", "hp"],
            &["int", "string", "int"],
            &["1", "Alice", "10"],
            &["2", "Bob"],
        ]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        assert!(matches!(err, ConvertError::RowLength { row: 7, column: 3 }));
    }

    #[test]
    fn test_long_row_is_rejected() {
        let g = sheet(&[&["id"], &["int"], &["1", "extra"]]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        assert!(matches!(err, ConvertError::RowLength { row: 6, column: 3 }));
    }

    #[test]
    fn test_blank_data_row_is_rejected() {
        let g = sheet(&[&["id"], &["int"], &[], &["1"]]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        assert!(matches!(err, ConvertError::RowLength { row: 6, column: 1 }));
    }

    #[test]
    fn test_conversion_error_carries_position() {
        let g = sheet(&[&["id", "hp"], &["int", "int"], &["1", "lots"]]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        match err {
            ConvertError::CellConversion {
                row,
                column,
                source: CoerceError::Int { text, .. },
            } => {
                assert_eq!(row, 6);
                assert_eq!(column, Some(2));
                assert_eq!(text, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_rejects_unknown_type() {
        let g = sheet(&[&["flag"], &["bool"], &["true"]]);

        assert_eq!(
            parse_list(&g, Strictness::Permissive).unwrap(),
            json!([{"flag": "true"}])
        );
        assert!(matches!(
            parse_list(&g, Strictness::Strict),
            Err(ConvertError::CellConversion {
                source: CoerceError::UnknownType { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_missing_header_rows() {
        let g = sheet(&[]);

        let err = parse_list(&g, Strictness::Permissive).unwrap_err();

        assert!(matches!(err, ConvertError::MalformedHeader { required: 5, found: 3 }));
    }
}
