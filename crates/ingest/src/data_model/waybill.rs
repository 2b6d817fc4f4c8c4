use model::waybill::Waybill;

use crate::coercion::FieldType;

use super::{Column, CsvRecord, FieldError, Row};

impl CsvRecord for Waybill {
    const COLUMNS: &'static [Column] = &[
        Column::new("id", FieldType::Identifier),
        Column::new("equipment_id", FieldType::String),
        Column::new("waybill_date", FieldType::Timestamp),
        Column::new("waybill_number", FieldType::String),
        Column::new("created_date", FieldType::Timestamp),
        Column::new("billing_road_mark_name", FieldType::String),
        Column::new("waybill_source_code", FieldType::String),
        Column::new("load_empty_status", FieldType::String),
        Column::new("origin_mark_name", FieldType::String),
        Column::new("destination_mark_name", FieldType::String),
        Column::new("sending_road_mark", FieldType::String),
        Column::new("bill_of_lading_number", FieldType::String),
        Column::new("bill_of_lading_date", FieldType::Timestamp),
        Column::new("equipment_weight", FieldType::Integer),
        Column::new("tare_weight", FieldType::Integer),
        Column::new("allowable_weight", FieldType::Integer),
        Column::new("dunnage_weight", FieldType::Integer),
        Column::new("equipment_weight_code", FieldType::String),
        Column::new("commodity_code", FieldType::String),
        Column::new("commodity_description", FieldType::String),
        Column::new("origin_id", FieldType::String),
        Column::new("destination_id", FieldType::String),
        Column::new("routes", FieldType::String),
        Column::new("parties", FieldType::String),
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: row.identifier(0)?,
            equipment_id: row.string(1)?,
            waybill_date: row.timestamp(2)?,
            waybill_number: row.string(3)?,
            created_date: row.timestamp(4)?,
            billing_road_mark_name: row.string(5)?,
            waybill_source_code: row.string(6)?,
            load_empty_status: row.string(7)?,
            origin_mark_name: row.string(8)?,
            destination_mark_name: row.string(9)?,
            sending_road_mark: row.string(10)?,
            bill_of_lading_number: row.string(11)?,
            bill_of_lading_date: row.timestamp(12)?,
            equipment_weight: row.integer(13)?,
            tare_weight: row.integer(14)?,
            allowable_weight: row.integer(15)?,
            dunnage_weight: row.integer(16)?,
            equipment_weight_code: row.string(17)?,
            commodity_code: row.string(18)?,
            commodity_description: row.string(19)?,
            origin_id: row.string(20)?,
            destination_id: row.string(21)?,
            routes: row.string(22)?,
            parties: row.string(23)?,
        })
    }
}
