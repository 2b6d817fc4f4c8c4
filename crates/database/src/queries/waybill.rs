use model::waybill::Waybill;
use railcar::database::Result;
use sqlx::{Executor, PgConnection, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{to_models, waybill::WaybillRow, DatabaseRow};

use super::convert_error;

const COLUMNS: [&str; 24] = [
    "id",
    "equipment_id",
    "waybill_date",
    "waybill_number",
    "created_date",
    "billing_road_mark_name",
    "waybill_source_code",
    "load_empty_status",
    "origin_mark_name",
    "destination_mark_name",
    "sending_road_mark",
    "bill_of_lading_number",
    "bill_of_lading_date",
    "equipment_weight",
    "tare_weight",
    "allowable_weight",
    "dunnage_weight",
    "equipment_weight_code",
    "commodity_code",
    "commodity_description",
    "origin_id",
    "destination_id",
    "routes",
    "parties",
];

// Repo

pub async fn get<'c, E>(executor: E, id: &str) -> Result<Waybill>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, equipment_id, waybill_date, waybill_number, created_date,
            billing_road_mark_name, waybill_source_code, load_empty_status,
            origin_mark_name, destination_mark_name, sending_road_mark,
            bill_of_lading_number, bill_of_lading_date, equipment_weight,
            tare_weight, allowable_weight, dunnage_weight, equipment_weight_code,
            commodity_code, commodity_description, origin_id, destination_id,
            routes, parties
        FROM waybills
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_one(executor)
    .await
    .map(|row: WaybillRow| row.to_model())
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Waybill>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, equipment_id, waybill_date, waybill_number, created_date,
            billing_road_mark_name, waybill_source_code, load_empty_status,
            origin_mark_name, destination_mark_name, sending_road_mark,
            bill_of_lading_number, bill_of_lading_date, equipment_weight,
            tare_weight, allowable_weight, dunnage_weight, equipment_weight_code,
            commodity_code, commodity_description, origin_id, destination_id,
            routes, parties
        FROM waybills
        ORDER BY seq;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<WaybillRow>| Ok(to_models(rows)))
}

pub async fn insert_all(conn: &mut PgConnection, waybills: &[Waybill]) -> Result<u64> {
    super::insert_all(conn, "waybills", &COLUMNS, waybills, |mut row, waybill| {
        row.push_bind(waybill.id.clone())
            .push_bind(waybill.equipment_id.clone())
            .push_bind(waybill.waybill_date)
            .push_bind(waybill.waybill_number.clone())
            .push_bind(waybill.created_date)
            .push_bind(waybill.billing_road_mark_name.clone())
            .push_bind(waybill.waybill_source_code.clone())
            .push_bind(waybill.load_empty_status.clone())
            .push_bind(waybill.origin_mark_name.clone())
            .push_bind(waybill.destination_mark_name.clone())
            .push_bind(waybill.sending_road_mark.clone())
            .push_bind(waybill.bill_of_lading_number.clone())
            .push_bind(waybill.bill_of_lading_date)
            .push_bind(waybill.equipment_weight)
            .push_bind(waybill.tare_weight)
            .push_bind(waybill.allowable_weight)
            .push_bind(waybill.dunnage_weight)
            .push_bind(waybill.equipment_weight_code.clone())
            .push_bind(waybill.commodity_code.clone())
            .push_bind(waybill.commodity_description.clone())
            .push_bind(waybill.origin_id.clone())
            .push_bind(waybill.destination_id.clone())
            .push_bind(waybill.routes.clone())
            .push_bind(waybill.parties.clone());
    })
    .await
    .map_err(convert_error)
}
