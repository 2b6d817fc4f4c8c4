use std::{error, fmt, result};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use model::{
    equipment::Equipment, event::Event, location::Location, waybill::Waybill, Entity,
    EntityKind,
};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl DatabaseError {
    pub fn other<E>(why: E) -> Self
    where
        E: Into<Box<dyn error::Error + Send + Sync>>,
    {
        Self::Other(why.into())
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait Repo<T: Entity> {
    async fn get(&mut self, id: &str) -> Result<T>;

    /// Returns all rows in the order they were inserted.
    async fn get_all(&mut self) -> Result<Vec<T>>;

    /// Bulk insert. Either every value is written or, if any value conflicts
    /// with an existing id or another value of the batch, none is.
    async fn insert_all(&mut self, values: &[T]) -> Result<u64>;
}

#[async_trait]
pub trait LocationRepo: Repo<Location> {
    /// Locations with any of the given ids. Unknown ids are ignored.
    async fn get_many(&mut self, ids: &[String]) -> Result<Vec<Location>>;
}

#[async_trait]
pub trait EquipmentRepo: Repo<Equipment> {
    async fn by_equipment_id(&mut self, equipment_id: &str) -> Result<Vec<Equipment>>;
}

#[async_trait]
pub trait EventRepo: Repo<Event> {
    /// Events posted strictly after `after`. All events if `after` is `None`.
    /// Events without a posting date never match a cutoff.
    async fn events_posted_after(
        &mut self,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>>;

    /// Events of a single waybill, with the same cutoff as `events_posted_after`.
    async fn events_by_waybill(
        &mut self,
        waybill_id: &str,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Event>>;
}

#[async_trait]
pub trait DatabaseOperations:
    LocationRepo + EquipmentRepo + EventRepo + Repo<Waybill> + Send
{
    /// Creates the table backing `kind` if it does not exist yet.
    async fn ensure_schema(&mut self, kind: EntityKind) -> Result<()>;

    /// Deletes every row of `kind`. Tables of other kinds are untouched.
    async fn reset(&mut self, kind: EntityKind) -> Result<()>;
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// Storage for the railcar datasets.
/// multiple concurrent accesses should be possible by e.g. cloning the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    /// Starts a transaction. Writes are discarded if it is dropped without
    /// calling `commit`.
    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;
}
