//! Cell text to typed JSON scalar

use serde_json::Value;
use thiserror::Error;

/// Type labels understood by the converter
pub mod labels {
    pub const INT: &str = "int";
    pub const FLOAT: &str = "float";
    pub const STRING: &str = "string";
}

/// How unrecognised type labels are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Unknown labels pass the cell text through as a string
    #[default]
    Permissive,
    /// Unknown labels are an error
    Strict,
}

#[derive(Debug, Error)]
pub enum CoerceError {
    #[error("'{text}' is not a valid int: {source}")]
    Int {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("'{text}' is not a valid float")]
    Float { text: String },

    #[error("unknown type '{label}'")]
    UnknownType { label: String },
}

/// Convert cell text according to its declared type label
pub fn coerce(text: &str, label: &str, strictness: Strictness) -> Result<Value, CoerceError> {
    match label {
        labels::INT => text
            .parse::<i64>()
            .map(Value::from)
            .map_err(|source| CoerceError::Int {
                text: text.to_string(),
                source,
            }),
        labels::FLOAT => parse_float(text).map(Value::from),
        labels::STRING => Ok(Value::String(text.to_string())),
        other => match strictness {
            Strictness::Permissive => Ok(Value::String(text.to_string())),
            Strictness::Strict => Err(CoerceError::UnknownType {
                label: other.to_string(),
            }),
        },
    }
}

// JSON has no representation for inf/NaN
fn parse_float(text: &str) -> Result<f64, CoerceError> {
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => Err(CoerceError::Float {
            text: text.to_string(),
        }),
    }
}
