use model::equipment::Equipment;
use railcar::database::Result;
use sqlx::{Executor, PgConnection, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{equipment::EquipmentRow, to_models, DatabaseRow};

use super::convert_error;

const COLUMNS: [&str; 7] = [
    "id",
    "customer",
    "fleet",
    "equipment_id",
    "equipment_status",
    "date_added",
    "date_removed",
];

// Repo

pub async fn get<'c, E>(executor: E, id: &str) -> Result<Equipment>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, customer, fleet, equipment_id,
            equipment_status, date_added, date_removed
        FROM equipment
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_one(executor)
    .await
    .map(|row: EquipmentRow| row.to_model())
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Equipment>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, customer, fleet, equipment_id,
            equipment_status, date_added, date_removed
        FROM equipment
        ORDER BY seq;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<EquipmentRow>| Ok(to_models(rows)))
}

pub async fn insert_all(conn: &mut PgConnection, equipment: &[Equipment]) -> Result<u64> {
    super::insert_all(conn, "equipment", &COLUMNS, equipment, |mut row, equipment| {
        row.push_bind(equipment.id.clone())
            .push_bind(equipment.customer.clone())
            .push_bind(equipment.fleet.clone())
            .push_bind(equipment.equipment_id.clone())
            .push_bind(equipment.equipment_status.clone())
            .push_bind(equipment.date_added)
            .push_bind(equipment.date_removed);
    })
    .await
    .map_err(convert_error)
}

// Equipment Repo

pub async fn by_equipment_id<'c, E>(executor: E, equipment_id: &str) -> Result<Vec<Equipment>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, customer, fleet, equipment_id,
            equipment_status, date_added, date_removed
        FROM equipment
        WHERE equipment_id = $1
        ORDER BY seq;
        ",
    )
    .bind(equipment_id)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<EquipmentRow>| Ok(to_models(rows)))
}
