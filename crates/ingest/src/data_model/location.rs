use model::location::Location;

use crate::coercion::FieldType;

use super::{Column, CsvRecord, FieldError, Row};

impl CsvRecord for Location {
    const COLUMNS: &'static [Column] = &[
        Column::new("id", FieldType::Identifier),
        Column::new("city", FieldType::String),
        Column::new("city_long", FieldType::String),
        Column::new("station", FieldType::String),
        Column::new("fsac", FieldType::String),
        Column::new("scac", FieldType::String),
        Column::new("splc", FieldType::String),
        Column::new("state", FieldType::String),
        Column::new("time_zone", FieldType::String),
        Column::new("longitude", FieldType::Float),
        Column::new("latitude", FieldType::Float),
        Column::new("country", FieldType::String),
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: row.identifier(0)?,
            city: row.string(1)?,
            city_long: row.string(2)?,
            station: row.string(3)?,
            fsac: row.string(4)?,
            scac: row.string(5)?,
            splc: row.string(6)?,
            state: row.string(7)?,
            time_zone: row.string(8)?,
            longitude: row.float(9)?,
            latitude: row.float(10)?,
            country: row.string(11)?,
        })
    }
}
