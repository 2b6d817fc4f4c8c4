//! A [`Database`] keeping every table in memory.
//!
//! Tables behave like their SQL counterparts where ingestion relies on it:
//! they must be created with `ensure_schema` before use, ids are primary
//! keys, and a transaction only publishes its writes on `commit`.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use model::{
    equipment::Equipment, event::Event, location::Location, waybill::Waybill, Entity,
    EntityKind,
};

use crate::database::{
    Database, DatabaseAutocommit, DatabaseError, DatabaseOperations, DatabaseTransaction,
    EquipmentRepo, EventRepo, LocationRepo, Repo, Result,
};

pub type Table<T> = IndexMap<String, T>;

/// The set of tables of an [`InMemoryDatabase`]. `None` means the table has
/// not been created yet.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    locations: Option<Table<Location>>,
    equipment: Option<Table<Equipment>>,
    waybills: Option<Table<Waybill>>,
    events: Option<Table<Event>>,
}

impl Tables {
    fn copy_table(&mut self, from: &Tables, kind: EntityKind) {
        match kind {
            EntityKind::Locations => self.locations = from.locations.clone(),
            EntityKind::Equipment => self.equipment = from.equipment.clone(),
            EntityKind::Waybills => self.waybills = from.waybills.clone(),
            EntityKind::Events => self.events = from.events.clone(),
        }
    }

    fn ensure_schema(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Locations => {
                self.locations.get_or_insert_with(IndexMap::new);
            }
            EntityKind::Equipment => {
                self.equipment.get_or_insert_with(IndexMap::new);
            }
            EntityKind::Waybills => {
                self.waybills.get_or_insert_with(IndexMap::new);
            }
            EntityKind::Events => {
                self.events.get_or_insert_with(IndexMap::new);
            }
        }
    }

    fn reset(&mut self, kind: EntityKind) -> Result<()> {
        let exists = match kind {
            EntityKind::Locations => self.locations.as_mut().map(IndexMap::clear),
            EntityKind::Equipment => self.equipment.as_mut().map(IndexMap::clear),
            EntityKind::Waybills => self.waybills.as_mut().map(IndexMap::clear),
            EntityKind::Events => self.events.as_mut().map(IndexMap::clear),
        };
        exists.ok_or_else(|| missing_table(kind))
    }
}

/// Maps a record type to its table.
pub trait MemoryEntity: Entity {
    fn table(tables: &Tables) -> Option<&Table<Self>>;
    fn table_mut(tables: &mut Tables) -> Option<&mut Table<Self>>;
}

impl MemoryEntity for Location {
    fn table(tables: &Tables) -> Option<&Table<Self>> {
        tables.locations.as_ref()
    }

    fn table_mut(tables: &mut Tables) -> Option<&mut Table<Self>> {
        tables.locations.as_mut()
    }
}

impl MemoryEntity for Equipment {
    fn table(tables: &Tables) -> Option<&Table<Self>> {
        tables.equipment.as_ref()
    }

    fn table_mut(tables: &mut Tables) -> Option<&mut Table<Self>> {
        tables.equipment.as_mut()
    }
}

impl MemoryEntity for Waybill {
    fn table(tables: &Tables) -> Option<&Table<Self>> {
        tables.waybills.as_ref()
    }

    fn table_mut(tables: &mut Tables) -> Option<&mut Table<Self>> {
        tables.waybills.as_mut()
    }
}

impl MemoryEntity for Event {
    fn table(tables: &Tables) -> Option<&Table<Self>> {
        tables.events.as_ref()
    }

    fn table_mut(tables: &mut Tables) -> Option<&mut Table<Self>> {
        tables.events.as_mut()
    }
}

fn missing_table(kind: EntityKind) -> DatabaseError {
    DatabaseError::other(format!("table \"{}\" does not exist", kind))
}

fn lock(tables: &Mutex<Tables>) -> Result<MutexGuard<'_, Tables>> {
    tables
        .lock()
        .map_err(|why| DatabaseError::other(why.to_string()))
}

// table operations shared by autocommit and transaction

fn get<T: MemoryEntity>(tables: &Tables, id: &str) -> Result<T> {
    T::table(tables)
        .ok_or_else(|| missing_table(T::KIND))?
        .get(id)
        .cloned()
        .ok_or(DatabaseError::NotFound)
}

fn get_all<T: MemoryEntity>(tables: &Tables) -> Result<Vec<T>> {
    T::table(tables)
        .ok_or_else(|| missing_table(T::KIND))
        .map(|table| table.values().cloned().collect())
}

fn insert_all<T: MemoryEntity>(tables: &mut Tables, values: &[T]) -> Result<u64> {
    let table = T::table_mut(tables).ok_or_else(|| missing_table(T::KIND))?;

    // check every key before writing, so a conflict leaves the table untouched
    let mut batch = IndexMap::with_capacity(values.len());
    for value in values {
        let id = value.id().to_owned();
        if table.contains_key(&id) || batch.contains_key(&id) {
            return Err(DatabaseError::other(format!(
                "duplicate key value violates unique constraint \"{}_pkey\": id={}",
                T::KIND,
                id
            )));
        }
        batch.insert(id, value.clone());
    }
    table.extend(batch);
    Ok(values.len() as u64)
}

fn events_posted_after(
    tables: &Tables,
    waybill_id: Option<&str>,
    after: Option<DateTime<Utc>>,
) -> Result<Vec<Event>> {
    get_all::<Event>(tables).map(|events| {
        events
            .into_iter()
            .filter(|event| waybill_id.map_or(true, |id| event.waybill_id == id))
            .filter(|event| match after {
                Some(after) => event.posting_date.is_some_and(|date| date > after),
                None => true,
            })
            .collect()
    })
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Database for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    type Autocommit = InMemoryAutocommit;

    async fn transaction(&self) -> Result<Self::Transaction> {
        Ok(InMemoryTransaction {
            shared: self.tables.clone(),
            staged: Tables::default(),
            touched: Vec::new(),
        })
    }

    fn auto(&self) -> Self::Autocommit {
        InMemoryAutocommit {
            tables: self.tables.clone(),
        }
    }
}

pub struct InMemoryAutocommit {
    tables: Arc<Mutex<Tables>>,
}

impl DatabaseAutocommit for InMemoryAutocommit {}

#[async_trait]
impl<T: MemoryEntity> Repo<T> for InMemoryAutocommit {
    async fn get(&mut self, id: &str) -> Result<T> {
        get(&*lock(&self.tables)?, id)
    }

    async fn get_all(&mut self) -> Result<Vec<T>> {
        get_all(&*lock(&self.tables)?)
    }

    async fn insert_all(&mut self, values: &[T]) -> Result<u64> {
        insert_all(&mut *lock(&self.tables)?, values)
    }
}

#[async_trait]
impl LocationRepo for InMemoryAutocommit {
    async fn get_many(&mut self, ids: &[String]) -> Result<Vec<Location>> {
        let locations: Vec<Location> = get_all(&*lock(&self.tables)?)?;
        Ok(locations
            .into_iter()
            .filter(|location| ids.contains(&location.id))
            .collect())
    }
}

#[async_trait]
impl EquipmentRepo for InMemoryAutocommit {
    async fn by_equipment_id(&mut self, equipment_id: &str) -> Result<Vec<Equipment>> {
        let equipment: Vec<Equipment> = get_all(&*lock(&self.tables)?)?;
        Ok(equipment
            .into_iter()
            .filter(|equipment| equipment.equipment_id == equipment_id)
            .collect())
    }
}

#[async_trait]
impl EventRepo for InMemoryAutocommit {
    async fn events_posted_after(
        &mut self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        events_posted_after(&*lock(&self.tables)?, None, after)
    }

    async fn events_by_waybill(
        &mut self,
        waybill_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        events_posted_after(&*lock(&self.tables)?, Some(waybill_id), after)
    }
}

#[async_trait]
impl DatabaseOperations for InMemoryAutocommit {
    async fn ensure_schema(&mut self, kind: EntityKind) -> Result<()> {
        lock(&self.tables)?.ensure_schema(kind);
        Ok(())
    }

    async fn reset(&mut self, kind: EntityKind) -> Result<()> {
        lock(&self.tables)?.reset(kind)
    }
}

/// Works on private copies of the tables it touches. `commit` replaces the
/// shared tables of exactly those kinds.
pub struct InMemoryTransaction {
    shared: Arc<Mutex<Tables>>,
    staged: Tables,
    touched: Vec<EntityKind>,
}

impl InMemoryTransaction {
    fn stage(&mut self, kind: EntityKind) -> Result<&mut Tables> {
        if !self.touched.contains(&kind) {
            let shared = lock(&self.shared)?;
            self.staged.copy_table(&shared, kind);
            self.touched.push(kind);
        }
        Ok(&mut self.staged)
    }
}

#[async_trait]
impl DatabaseTransaction for InMemoryTransaction {
    async fn commit(self) -> Result<()> {
        let mut shared = lock(&self.shared)?;
        for kind in self.touched.iter() {
            shared.copy_table(&self.staged, *kind);
        }
        Ok(())
    }
}

#[async_trait]
impl<T: MemoryEntity> Repo<T> for InMemoryTransaction {
    async fn get(&mut self, id: &str) -> Result<T> {
        get(self.stage(T::KIND)?, id)
    }

    async fn get_all(&mut self) -> Result<Vec<T>> {
        get_all(self.stage(T::KIND)?)
    }

    async fn insert_all(&mut self, values: &[T]) -> Result<u64> {
        insert_all(self.stage(T::KIND)?, values)
    }
}

#[async_trait]
impl LocationRepo for InMemoryTransaction {
    async fn get_many(&mut self, ids: &[String]) -> Result<Vec<Location>> {
        let locations: Vec<Location> = get_all(self.stage(EntityKind::Locations)?)?;
        Ok(locations
            .into_iter()
            .filter(|location| ids.contains(&location.id))
            .collect())
    }
}

#[async_trait]
impl EquipmentRepo for InMemoryTransaction {
    async fn by_equipment_id(&mut self, equipment_id: &str) -> Result<Vec<Equipment>> {
        let equipment: Vec<Equipment> = get_all(self.stage(EntityKind::Equipment)?)?;
        Ok(equipment
            .into_iter()
            .filter(|equipment| equipment.equipment_id == equipment_id)
            .collect())
    }
}

#[async_trait]
impl EventRepo for InMemoryTransaction {
    async fn events_posted_after(
        &mut self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        events_posted_after(self.stage(EntityKind::Events)?, None, after)
    }

    async fn events_by_waybill(
        &mut self,
        waybill_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>> {
        events_posted_after(self.stage(EntityKind::Events)?, Some(waybill_id), after)
    }
}

#[async_trait]
impl DatabaseOperations for InMemoryTransaction {
    async fn ensure_schema(&mut self, kind: EntityKind) -> Result<()> {
        self.stage(kind)?.ensure_schema(kind);
        Ok(())
    }

    async fn reset(&mut self, kind: EntityKind) -> Result<()> {
        self.stage(kind)?.reset(kind)
    }
}
