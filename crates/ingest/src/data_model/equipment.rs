use model::equipment::Equipment;

use crate::coercion::FieldType;

use super::{Column, CsvRecord, FieldError, Row};

impl CsvRecord for Equipment {
    const COLUMNS: &'static [Column] = &[
        Column::new("id", FieldType::Identifier),
        Column::new("customer", FieldType::String),
        Column::new("fleet", FieldType::String),
        Column::new("equipment_id", FieldType::String),
        Column::new("equipment_status", FieldType::String),
        Column::new("date_added", FieldType::Timestamp),
        Column::new("date_removed", FieldType::Timestamp),
    ];

    fn from_row(row: &Row<'_>) -> Result<Self, FieldError> {
        Ok(Self {
            id: row.identifier(0)?,
            customer: row.string(1)?,
            fleet: row.string(2)?,
            equipment_id: row.string(3)?,
            equipment_status: row.string(4)?,
            date_added: row.timestamp(5)?,
            date_removed: row.timestamp(6)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use model::equipment::Equipment;

    use crate::data_model::parse;

    const ROW: [&str; 7] = [
        "4",
        "Acme Chemicals",
        "Tank Fleet",
        "TILX 290110",
        "ACTIVE",
        "2020-01-01T00:00:00Z",
        "",
    ];

    #[test]
    fn parses_by_position() {
        let equipment = parse::<Equipment>(&ROW).unwrap();
        assert_eq!(equipment.id, "4");
        assert_eq!(equipment.equipment_id, "TILX 290110");
        assert_eq!(equipment.equipment_status, "ACTIVE");
        assert_eq!(
            equipment.date_added,
            Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn removed_date_in_naive_format() {
        let mut row = ROW;
        row[4] = "RETIRED";
        row[6] = "2023-06-30 12:00:00";
        let equipment = parse::<Equipment>(&row).unwrap();
        assert_eq!(equipment.equipment_status, "RETIRED");
        assert_eq!(
            equipment.date_removed,
            Some(Utc.with_ymd_and_hms(2023, 6, 30, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn rejects_unparseable_date() {
        let mut row = ROW;
        row[5] = "not-a-date";
        let err = parse::<Equipment>(&row).unwrap_err();
        assert_eq!(err.column, "date_added");
        assert_eq!(err.position, 5);
    }

    #[test]
    fn status_is_passed_through() {
        for status in ["", "Y", "Active", "true"] {
            let mut row = ROW;
            row[4] = status;
            assert_eq!(parse::<Equipment>(&row).unwrap().equipment_status, status);
        }
    }
}
