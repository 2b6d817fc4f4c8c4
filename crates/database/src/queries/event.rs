use chrono::{DateTime, Utc};
use model::event::Event;
use railcar::database::Result;
use sqlx::{Executor, PgConnection, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{event::EventRow, to_models, DatabaseRow};

use super::convert_error;

const COLUMNS: [&str; 14] = [
    "id",
    "equipment_id",
    "sighting_date",
    "sighting_event_code",
    "reporting_railroad_scac",
    "posting_date",
    "from_mark_id",
    "load_empty_status",
    "sighting_claim_code",
    "sighting_event_code_text",
    "train_id",
    "train_alpha_code",
    "location_id",
    "waybill_id",
];

// Repo

pub async fn get<'c, E>(executor: E, id: &str) -> Result<Event>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, equipment_id, sighting_date, sighting_event_code,
            reporting_railroad_scac, posting_date, from_mark_id,
            load_empty_status, sighting_claim_code, sighting_event_code_text,
            train_id, train_alpha_code, location_id, waybill_id
        FROM events
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_one(executor)
    .await
    .map(|row: EventRow| row.to_model())
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Event>>
where
    E: Executor<'c, Database = Postgres>,
{
    posted_after(executor, None).await
}

pub async fn insert_all(conn: &mut PgConnection, events: &[Event]) -> Result<u64> {
    super::insert_all(conn, "events", &COLUMNS, events, |mut row, event| {
        row.push_bind(event.id.clone())
            .push_bind(event.equipment_id.clone())
            .push_bind(event.sighting_date)
            .push_bind(event.sighting_event_code.clone())
            .push_bind(event.reporting_railroad_scac.clone())
            .push_bind(event.posting_date)
            .push_bind(event.from_mark_id.clone())
            .push_bind(event.load_empty_status.clone())
            .push_bind(event.sighting_claim_code.clone())
            .push_bind(event.sighting_event_code_text.clone())
            .push_bind(event.train_id.clone())
            .push_bind(event.train_alpha_code.clone())
            .push_bind(event.location_id.clone())
            .push_bind(event.waybill_id.clone());
    })
    .await
    .map_err(convert_error)
}

// Event Repo

/// A `NULL` posting date never compares greater, so such events only show up
/// without a cutoff.
pub async fn posted_after<'c, E>(
    executor: E,
    after: Option<DateTime<Utc>>,
) -> Result<Vec<Event>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, equipment_id, sighting_date, sighting_event_code,
            reporting_railroad_scac, posting_date, from_mark_id,
            load_empty_status, sighting_claim_code, sighting_event_code_text,
            train_id, train_alpha_code, location_id, waybill_id
        FROM events
        WHERE $1::TIMESTAMPTZ IS NULL OR posting_date > $1
        ORDER BY seq;
        ",
    )
    .bind(after)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<EventRow>| Ok(to_models(rows)))
}

pub async fn by_waybill<'c, E>(
    executor: E,
    waybill_id: &str,
    after: Option<DateTime<Utc>>,
) -> Result<Vec<Event>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, equipment_id, sighting_date, sighting_event_code,
            reporting_railroad_scac, posting_date, from_mark_id,
            load_empty_status, sighting_claim_code, sighting_event_code_text,
            train_id, train_alpha_code, location_id, waybill_id
        FROM events
        WHERE waybill_id = $1
            AND ($2::TIMESTAMPTZ IS NULL OR posting_date > $2)
        ORDER BY seq;
        ",
    )
    .bind(waybill_id)
    .bind(after)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<EventRow>| Ok(to_models(rows)))
}
