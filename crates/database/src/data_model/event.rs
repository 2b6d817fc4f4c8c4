use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::event::Event;
use railcar::database::{EventRepo, Repo, Result};
use sqlx::prelude::FromRow;

use crate::{
    queries::{
        convert_error,
        event::{by_waybill, get, get_all, insert_all, posted_after},
    },
    PgDatabaseAutocommit, PgDatabaseTransaction,
};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: String,
    pub equipment_id: String,
    pub sighting_date: Option<DateTime<Utc>>,
    pub sighting_event_code: String,
    pub reporting_railroad_scac: String,
    pub posting_date: Option<DateTime<Utc>>,
    pub from_mark_id: String,
    pub load_empty_status: String,
    pub sighting_claim_code: String,
    pub sighting_event_code_text: String,
    pub train_id: String,
    pub train_alpha_code: String,
    pub location_id: String,
    pub waybill_id: String,
}

impl DatabaseRow for EventRow {
    type Model = Event;

    fn to_model(self) -> Self::Model {
        Event {
            id: self.id,
            equipment_id: self.equipment_id,
            sighting_date: self.sighting_date,
            sighting_event_code: self.sighting_event_code,
            reporting_railroad_scac: self.reporting_railroad_scac,
            posting_date: self.posting_date,
            from_mark_id: self.from_mark_id,
            load_empty_status: self.load_empty_status,
            sighting_claim_code: self.sighting_claim_code,
            sighting_event_code_text: self.sighting_event_code_text,
            train_id: self.train_id,
            train_alpha_code: self.train_alpha_code,
            location_id: self.location_id,
            waybill_id: self.waybill_id,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Event> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &str) -> Result<Event> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Event>> {
        get_all(&self.pool).await
    }

    async fn insert_all(&mut self, values: &[Event]) -> Result<u64> {
        let mut tx = self.begin().await?;
        let inserted = insert_all(&mut *tx, values).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(inserted)
    }
}

#[async_trait]
impl<'a> Repo<Event> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &str) -> Result<Event> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Event>> {
        get_all(&mut *self.tx).await
    }

    async fn insert_all(&mut self, values: &[Event]) -> Result<u64> {
        insert_all(&mut *self.tx, values).await
    }
}

// Event Repo

#[async_trait]
impl EventRepo for PgDatabaseAutocommit {
    async fn events_posted_after(
        &mut self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        posted_after(&self.pool, after).await
    }

    async fn events_by_waybill(
        &mut self,
        waybill_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        by_waybill(&self.pool, waybill_id, after).await
    }
}

#[async_trait]
impl<'a> EventRepo for PgDatabaseTransaction<'a> {
    async fn events_posted_after(
        &mut self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        posted_after(&mut *self.tx, after).await
    }

    async fn events_by_waybill(
        &mut self,
        waybill_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        by_waybill(&mut *self.tx, waybill_id, after).await
    }
}
