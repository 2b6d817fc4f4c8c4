use model::EntityKind;
use railcar::database::Result;
use sqlx::{Executor, Postgres};

use super::convert_error;

// `seq` keeps the insertion order, ids are arbitrary strings.

const CREATE_LOCATIONS: &str = "
    CREATE TABLE IF NOT EXISTS locations (
        seq BIGSERIAL NOT NULL,
        id TEXT PRIMARY KEY,
        city TEXT NOT NULL,
        city_long TEXT NOT NULL,
        station TEXT NOT NULL,
        fsac TEXT NOT NULL,
        scac TEXT NOT NULL,
        splc TEXT NOT NULL,
        state TEXT NOT NULL,
        time_zone TEXT NOT NULL,
        longitude DOUBLE PRECISION,
        latitude DOUBLE PRECISION,
        country TEXT NOT NULL
    );
";

const CREATE_EQUIPMENT: &str = "
    CREATE TABLE IF NOT EXISTS equipment (
        seq BIGSERIAL NOT NULL,
        id TEXT PRIMARY KEY,
        customer TEXT NOT NULL,
        fleet TEXT NOT NULL,
        equipment_id TEXT NOT NULL,
        equipment_status TEXT NOT NULL,
        date_added TIMESTAMPTZ,
        date_removed TIMESTAMPTZ
    );
";

const CREATE_WAYBILLS: &str = "
    CREATE TABLE IF NOT EXISTS waybills (
        seq BIGSERIAL NOT NULL,
        id TEXT PRIMARY KEY,
        equipment_id TEXT NOT NULL,
        waybill_date TIMESTAMPTZ,
        waybill_number TEXT NOT NULL,
        created_date TIMESTAMPTZ,
        billing_road_mark_name TEXT NOT NULL,
        waybill_source_code TEXT NOT NULL,
        load_empty_status TEXT NOT NULL,
        origin_mark_name TEXT NOT NULL,
        destination_mark_name TEXT NOT NULL,
        sending_road_mark TEXT NOT NULL,
        bill_of_lading_number TEXT NOT NULL,
        bill_of_lading_date TIMESTAMPTZ,
        equipment_weight BIGINT NOT NULL,
        tare_weight BIGINT NOT NULL,
        allowable_weight BIGINT NOT NULL,
        dunnage_weight BIGINT NOT NULL,
        equipment_weight_code TEXT NOT NULL,
        commodity_code TEXT NOT NULL,
        commodity_description TEXT NOT NULL,
        origin_id TEXT NOT NULL,
        destination_id TEXT NOT NULL,
        routes TEXT NOT NULL,
        parties TEXT NOT NULL
    );
";

const CREATE_EVENTS: &str = "
    CREATE TABLE IF NOT EXISTS events (
        seq BIGSERIAL NOT NULL,
        id TEXT PRIMARY KEY,
        equipment_id TEXT NOT NULL,
        sighting_date TIMESTAMPTZ,
        sighting_event_code TEXT NOT NULL,
        reporting_railroad_scac TEXT NOT NULL,
        posting_date TIMESTAMPTZ,
        from_mark_id TEXT NOT NULL,
        load_empty_status TEXT NOT NULL,
        sighting_claim_code TEXT NOT NULL,
        sighting_event_code_text TEXT NOT NULL,
        train_id TEXT NOT NULL,
        train_alpha_code TEXT NOT NULL,
        location_id TEXT NOT NULL,
        waybill_id TEXT NOT NULL
    );
";

fn create_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Locations => CREATE_LOCATIONS,
        EntityKind::Equipment => CREATE_EQUIPMENT,
        EntityKind::Waybills => CREATE_WAYBILLS,
        EntityKind::Events => CREATE_EVENTS,
    }
}

pub async fn ensure_schema<'c, E>(executor: E, kind: EntityKind) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(create_table(kind))
        .execute(executor)
        .await
        .map(|_| ())
        .map_err(convert_error)
}

/// Deletes all rows of one table. The table itself is kept.
pub async fn reset<'c, E>(executor: E, kind: EntityKind) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(&format!("DELETE FROM {};", kind.name()))
        .execute(executor)
        .await
        .map(|_| ())
        .map_err(convert_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_creates_its_own_table() {
        for kind in EntityKind::ALL {
            let ddl = create_table(kind);
            assert!(
                ddl.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", kind.name())),
                "{kind}"
            );
            assert!(ddl.contains("id TEXT PRIMARY KEY"));
        }
    }
}
