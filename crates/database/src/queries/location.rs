use model::location::Location;
use railcar::database::Result;
use sqlx::{Executor, PgConnection, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{location::LocationRow, to_models, DatabaseRow};

use super::convert_error;

const COLUMNS: [&str; 12] = [
    "id",
    "city",
    "city_long",
    "station",
    "fsac",
    "scac",
    "splc",
    "state",
    "time_zone",
    "longitude",
    "latitude",
    "country",
];

// Repo

pub async fn get<'c, E>(executor: E, id: &str) -> Result<Location>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, city, city_long, station, fsac, scac, splc,
            state, time_zone, longitude, latitude, country
        FROM locations
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_one(executor)
    .await
    .map(|row: LocationRow| row.to_model())
    .map_err(convert_error)
}

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, city, city_long, station, fsac, scac, splc,
            state, time_zone, longitude, latitude, country
        FROM locations
        ORDER BY seq;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<LocationRow>| Ok(to_models(rows)))
}

pub async fn insert_all(conn: &mut PgConnection, locations: &[Location]) -> Result<u64> {
    super::insert_all(conn, "locations", &COLUMNS, locations, |mut row, location| {
        row.push_bind(location.id.clone())
            .push_bind(location.city.clone())
            .push_bind(location.city_long.clone())
            .push_bind(location.station.clone())
            .push_bind(location.fsac.clone())
            .push_bind(location.scac.clone())
            .push_bind(location.splc.clone())
            .push_bind(location.state.clone())
            .push_bind(location.time_zone.clone())
            .push_bind(location.longitude)
            .push_bind(location.latitude)
            .push_bind(location.country.clone());
    })
    .await
    .map_err(convert_error)
}

// Location Repo

pub async fn get_many<'c, E>(executor: E, ids: &[String]) -> Result<Vec<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, city, city_long, station, fsac, scac, splc,
            state, time_zone, longitude, latitude, country
        FROM locations
        WHERE id = ANY($1)
        ORDER BY seq;
        ",
    )
    .bind(ids)
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<LocationRow>| Ok(to_models(rows)))
}
