//! Row parsers. Every record type declares its columns in file order and is
//! built by position. The header row is never consulted for names, so a file
//! whose columns were reordered parses into wrong values without an error.

use csv::{ByteRecord, StringRecord};
use model::Entity;
use thiserror::Error;

use crate::coercion::{self, CoercionError, FieldType};

pub mod equipment;
pub mod event;
pub mod location;
pub mod waybill;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl Column {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// A cell of a row that could not be coerced into its column's type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {column} (column {position}): {source}")]
pub struct FieldError {
    pub column: &'static str,
    pub position: usize,
    #[source]
    pub source: CoercionError,
}

fn column_name(columns: &[Column], position: usize) -> &'static str {
    columns.get(position).map_or("?", |column| column.name)
}

/// Decodes a raw data row. A cell that is not valid UTF-8 fails like any
/// other cell that can not be coerced.
pub fn decode(record: ByteRecord, columns: &'static [Column]) -> Result<StringRecord, FieldError> {
    StringRecord::from_byte_record(record).map_err(|why| {
        let position = why.utf8_error().field();
        FieldError {
            column: column_name(columns, position),
            position,
            source: CoercionError::InvalidUtf8 {
                valid_up_to: why.utf8_error().valid_up_to(),
            },
        }
    })
}

/// A record type which can be built from one csv data row.
pub trait CsvRecord: Entity {
    /// The columns of a data row, in file order.
    const COLUMNS: &'static [Column];

    /// Builds the record from a row. Fails on the first cell that can not be
    /// coerced, so there are no partially filled records.
    fn from_row(row: &Row<'_>) -> Result<Self, FieldError>;
}

/// Typed access to the cells of one csv data row.
pub struct Row<'a> {
    record: &'a StringRecord,
    columns: &'static [Column],
}

impl<'a> Row<'a> {
    pub fn new(record: &'a StringRecord, columns: &'static [Column]) -> Self {
        Self { record, columns }
    }

    fn coerce<T, F>(&self, position: usize, expected: FieldType, f: F) -> Result<T, FieldError>
    where
        F: FnOnce(&str) -> Result<T, CoercionError>,
    {
        debug_assert_eq!(
            self.columns.get(position).map(|column| column.field_type),
            Some(expected)
        );

        self.record
            .get(position)
            .ok_or(CoercionError::Missing)
            .and_then(f)
            .map_err(|source| FieldError {
                column: column_name(self.columns, position),
                position,
                source,
            })
    }

    pub fn string(&self, position: usize) -> Result<String, FieldError> {
        self.coerce(position, FieldType::String, |raw| Ok(coercion::string(raw)))
    }

    pub fn identifier(&self, position: usize) -> Result<String, FieldError> {
        self.coerce(position, FieldType::Identifier, coercion::identifier)
    }

    pub fn integer(&self, position: usize) -> Result<i64, FieldError> {
        self.coerce(position, FieldType::Integer, coercion::integer)
    }

    pub fn float(&self, position: usize) -> Result<Option<f64>, FieldError> {
        self.coerce(position, FieldType::Float, coercion::float)
    }

    pub fn timestamp(
        &self,
        position: usize,
    ) -> Result<Option<chrono::DateTime<chrono::Utc>>, FieldError> {
        self.coerce(position, FieldType::Timestamp, coercion::timestamp)
    }
}

#[cfg(test)]
pub(crate) fn parse<T: CsvRecord>(cells: &[&str]) -> Result<T, FieldError> {
    let record = StringRecord::from(cells.to_vec());
    T::from_row(&Row::new(&record, T::COLUMNS))
}

#[cfg(test)]
mod tests {
    use model::location::Location;

    use super::*;

    #[test]
    fn missing_cell_names_the_column() {
        let err = parse::<Location>(&["1", "KANSAS CITY"]).unwrap_err();
        assert_eq!(err.column, "city_long");
        assert_eq!(err.position, 2);
        assert_eq!(err.source, CoercionError::Missing);
    }

    #[test]
    fn error_message_contains_column_and_cause() {
        let err = FieldError {
            column: "date_added",
            position: 5,
            source: CoercionError::NoValidFormat {
                raw: "not-a-date".to_owned(),
            },
        };
        assert_eq!(
            err.to_string(),
            "parsing date_added (column 5): could not parse \"not-a-date\" with any valid timestamp format"
        );
    }

    #[test]
    fn invalid_utf8_names_the_column() {
        let record = ByteRecord::from(vec![&b"1"[..], &b"Ac\xffme"[..]]);
        let err = decode(record, Location::COLUMNS).unwrap_err();
        assert_eq!(err.column, "city");
        assert_eq!(err.position, 1);
        assert_eq!(err.source, CoercionError::InvalidUtf8 { valid_up_to: 2 });
    }
}
