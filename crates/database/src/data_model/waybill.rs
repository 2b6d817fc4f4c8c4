use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::waybill::Waybill;
use railcar::database::{Repo, Result};
use sqlx::prelude::FromRow;

use crate::{
    queries::{
        convert_error,
        waybill::{get, get_all, insert_all},
    },
    PgDatabaseAutocommit, PgDatabaseTransaction,
};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct WaybillRow {
    pub id: String,
    pub equipment_id: String,
    pub waybill_date: Option<DateTime<Utc>>,
    pub waybill_number: String,
    pub created_date: Option<DateTime<Utc>>,
    pub billing_road_mark_name: String,
    pub waybill_source_code: String,
    pub load_empty_status: String,
    pub origin_mark_name: String,
    pub destination_mark_name: String,
    pub sending_road_mark: String,
    pub bill_of_lading_number: String,
    pub bill_of_lading_date: Option<DateTime<Utc>>,
    pub equipment_weight: i64,
    pub tare_weight: i64,
    pub allowable_weight: i64,
    pub dunnage_weight: i64,
    pub equipment_weight_code: String,
    pub commodity_code: String,
    pub commodity_description: String,
    pub origin_id: String,
    pub destination_id: String,
    pub routes: String,
    pub parties: String,
}

impl DatabaseRow for WaybillRow {
    type Model = Waybill;

    fn to_model(self) -> Self::Model {
        Waybill {
            id: self.id,
            equipment_id: self.equipment_id,
            waybill_date: self.waybill_date,
            waybill_number: self.waybill_number,
            created_date: self.created_date,
            billing_road_mark_name: self.billing_road_mark_name,
            waybill_source_code: self.waybill_source_code,
            load_empty_status: self.load_empty_status,
            origin_mark_name: self.origin_mark_name,
            destination_mark_name: self.destination_mark_name,
            sending_road_mark: self.sending_road_mark,
            bill_of_lading_number: self.bill_of_lading_number,
            bill_of_lading_date: self.bill_of_lading_date,
            equipment_weight: self.equipment_weight,
            tare_weight: self.tare_weight,
            allowable_weight: self.allowable_weight,
            dunnage_weight: self.dunnage_weight,
            equipment_weight_code: self.equipment_weight_code,
            commodity_code: self.commodity_code,
            commodity_description: self.commodity_description,
            origin_id: self.origin_id,
            destination_id: self.destination_id,
            routes: self.routes,
            parties: self.parties,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Waybill> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &str) -> Result<Waybill> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Waybill>> {
        get_all(&self.pool).await
    }

    async fn insert_all(&mut self, values: &[Waybill]) -> Result<u64> {
        let mut tx = self.begin().await?;
        let inserted = insert_all(&mut *tx, values).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(inserted)
    }
}

#[async_trait]
impl<'a> Repo<Waybill> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &str) -> Result<Waybill> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Waybill>> {
        get_all(&mut *self.tx).await
    }

    async fn insert_all(&mut self, values: &[Waybill]) -> Result<u64> {
        insert_all(&mut *self.tx, values).await
    }
}
