use model::event::Event;

use crate::coercion::FieldType;

use super::{Column, CsvRecord, FieldError, Row};

impl CsvRecord for Event {
    const COLUMNS: &'static [Column] = &[
        Column::new("id", FieldType::Identifier),
        Column::new("equipment_id", FieldType::String),
        Column::new("sighting_date", FieldType::Timestamp),
        Column::new("sighting_event_code", FieldType::String),
        Column::new("reporting_railroad_scac", FieldType::String),
        Column::new("posting_date", FieldType::Timestamp),
        Column::new("from_mark_id", FieldType::String),
        Column::new("load_empty_status", FieldType::String),
        Column::new("sighting_claim_code", FieldType::String),
        Column::new("sighting_event_code_text", FieldType::String),
        Column::new("train_id", FieldType::String),
        Column::new("train_alpha_code", FieldType::String),
        Column::new("location_id", FieldType::String),
        Column::new("waybill_id", FieldType::String),
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: row.identifier(0)?,
            equipment_id: row.string(1)?,
            sighting_date: row.timestamp(2)?,
            sighting_event_code: row.string(3)?,
            reporting_railroad_scac: row.string(4)?,
            posting_date: row.timestamp(5)?,
            from_mark_id: row.string(6)?,
            load_empty_status: row.string(7)?,
            sighting_claim_code: row.string(8)?,
            sighting_event_code_text: row.string(9)?,
            train_id: row.string(10)?,
            train_alpha_code: row.string(11)?,
            location_id: row.string(12)?,
            waybill_id: row.string(13)?,
        })
    }
}
