use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::equipment::Equipment;
use railcar::database::{EquipmentRepo, Repo, Result};
use sqlx::prelude::FromRow;

use crate::{
    queries::{
        convert_error,
        equipment::{by_equipment_id, get, get_all, insert_all},
    },
    PgDatabaseAutocommit, PgDatabaseTransaction,
};

use super::DatabaseRow;

#[derive(Debug, Clone, FromRow)]
pub struct EquipmentRow {
    pub id: String,
    pub customer: String,
    pub fleet: String,
    pub equipment_id: String,
    pub equipment_status: String,
    pub date_added: Option<DateTime<Utc>>,
    pub date_removed: Option<DateTime<Utc>>,
}

impl DatabaseRow for EquipmentRow {
    type Model = Equipment;

    fn to_model(self) -> Self::Model {
        Equipment {
            id: self.id,
            customer: self.customer,
            fleet: self.fleet,
            equipment_id: self.equipment_id,
            equipment_status: self.equipment_status,
            date_added: self.date_added,
            date_removed: self.date_removed,
        }
    }
}

// Repo

#[async_trait]
impl Repo<Equipment> for PgDatabaseAutocommit {
    async fn get(&mut self, id: &str) -> Result<Equipment> {
        get(&self.pool, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Equipment>> {
        get_all(&self.pool).await
    }

    async fn insert_all(&mut self, values: &[Equipment]) -> Result<u64> {
        let mut tx = self.begin().await?;
        let inserted = insert_all(&mut *tx, values).await?;
        tx.commit().await.map_err(convert_error)?;
        Ok(inserted)
    }
}

#[async_trait]
impl<'a> Repo<Equipment> for PgDatabaseTransaction<'a> {
    async fn get(&mut self, id: &str) -> Result<Equipment> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Equipment>> {
        get_all(&mut *self.tx).await
    }

    async fn insert_all(&mut self, values: &[Equipment]) -> Result<u64> {
        insert_all(&mut *self.tx, values).await
    }
}

// Equipment Repo

#[async_trait]
impl EquipmentRepo for PgDatabaseAutocommit {
    async fn by_equipment_id(&mut self, equipment_id: &str) -> Result<Vec<Equipment>> {
        by_equipment_id(&self.pool, equipment_id).await
    }
}

#[async_trait]
impl<'a> EquipmentRepo for PgDatabaseTransaction<'a> {
    async fn by_equipment_id(&mut self, equipment_id: &str) -> Result<Vec<Equipment>> {
        by_equipment_id(&mut *self.tx, equipment_id).await
    }
}
