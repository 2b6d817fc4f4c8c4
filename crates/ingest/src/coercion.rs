//! Conversion of single csv cells into typed values.

use std::num::{ParseFloatError, ParseIntError};

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Timestamp formats tried after RFC 3339, in this order. Values without an
/// offset are taken as UTC.
pub const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.6f"];

/// The semantic type of a csv column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Any text, including the empty string.
    String,
    /// Text that must not be empty.
    Identifier,
    Integer,
    /// A float, or empty for none.
    Float,
    /// A timestamp, or empty for none.
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("cell is missing")]
    Missing,

    #[error("cell is not valid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("identifier is empty")]
    EmptyIdentifier,

    #[error("invalid integer {raw:?}: {source}")]
    Integer { raw: String, source: ParseIntError },

    #[error("invalid float {raw:?}: {source}")]
    Float { raw: String, source: ParseFloatError },

    #[error("could not parse {raw:?} with any valid timestamp format")]
    NoValidFormat { raw: String },
}

pub fn string(raw: &str) -> String {
    raw.to_owned()
}

pub fn identifier(raw: &str) -> Result<String, CoercionError> {
    if raw.is_empty() {
        return Err(CoercionError::EmptyIdentifier);
    }
    Ok(raw.to_owned())
}

/// A base-10 signed 64 bit integer.
pub fn integer(raw: &str) -> Result<i64, CoercionError> {
    raw.parse().map_err(|source| CoercionError::Integer {
        raw: raw.to_owned(),
        source,
    })
}

pub fn float(raw: &str) -> Result<Option<f64>, CoercionError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|source| CoercionError::Float {
            raw: raw.to_owned(),
            source,
        })
}

/// Parses a timestamp and normalizes it to UTC.
///
/// An empty cell is the zero timestamp, represented as `None`. Otherwise RFC
/// 3339 is tried first, then [`NAIVE_TIMESTAMP_FORMATS`]. The first format
/// that matches wins.
pub fn timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, CoercionError> {
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(date_time) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(date_time.with_timezone(&Utc)));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| CoercionError::NoValidFormat {
            raw: raw.to_owned(),
        })
}
