use async_trait::async_trait;
use model::location::Location;
use railcar::database::{LocationRepo, Repo, Result};
use sqlx::prelude::FromRow;

use crate::{
    queries::{
        convert_error,
        location::{get, get_all, get_many, insert_all},
    },
    PgDatabaseAutocommit, PgDatabaseTransaction,
};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: String,
    pub city: String,
    pub city_long: String,
    pub station: String,
    pub fsac: String,
    pub scac: String,
    pub splc: String,
    pub state: String,
    pub time_zone: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub country: String,
}

impl DatabaseRow for LocationRow {
    type Model = Location;

    fn to_model(self) -> Self::Model {
        Location {
            id: self.id,
            city: self.city,
            city_long: self.city_long,
            station: self.station,
            fsac: self.fsac,
            scac: self.scac,
            splc: self.splc,
            state: self.state,
            time_zone: self.time_zone,
            longitude: self.longitude,
            latitude: self.latitude,
            country: self.country,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Location> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &str) -> Result<Location> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Location>> {
        get_all(&self.pool).await
    }

    async fn insert_all(&mut self, values: &[Location]) -> Result<u64> {
        let mut tx = self.begin().await?;
        let inserted = insert_all(&mut *tx, values).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(inserted)
    }
}

#[async_trait]
impl<'a> Repo<Location> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &str) -> Result<Location> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Location>> {
        get_all(&mut *self.tx).await
    }

    async fn insert_all(&mut self, values: &[Location]) -> Result<u64> {
        insert_all(&mut *self.tx, values).await
    }
}

// Location Repo

#[async_trait]
impl LocationRepo for PgDatabaseAutocommit {
    async fn get_many(&mut self, ids: &[String]) -> Result<Vec<Location>> {
        get_many(&self.pool, ids).await
    }
}

#[async_trait]
impl<'a> LocationRepo for PgDatabaseTransaction<'a> {
    async fn get_many(&mut self, ids: &[String]) -> Result<Vec<Location>> {
        get_many(&mut *self.tx, ids).await
    }
}
