use chrono::{DateTime, Utc};
use model::{
    equipment::Equipment,
    event::Event,
    location::Location,
    waybill::{Party, RouteHop, Waybill},
};
use utility::let_also::LetAlso;

use crate::{
    database::{Database, EquipmentRepo, EventRepo, LocationRepo, Repo},
    RequestError, RequestResult,
};

/// Read access to the stored datasets, including the views derived from a
/// single waybill.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub async fn get_locations(&self) -> RequestResult<Vec<Location>> {
        Ok(Repo::<Location>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn get_location(&self, id: &str) -> RequestResult<Location> {
        Ok(Repo::<Location>::get(&mut self.database.auto(), id).await?)
    }

    pub async fn get_equipment(&self) -> RequestResult<Vec<Equipment>> {
        Ok(Repo::<Equipment>::get_all(&mut self.database.auto()).await?)
    }

    /// A single railcar by its record id, not by its reporting mark.
    pub async fn get_equipment_item(&self, id: &str) -> RequestResult<Equipment> {
        Ok(Repo::<Equipment>::get(&mut self.database.auto(), id).await?)
    }

    pub async fn get_waybills(&self) -> RequestResult<Vec<Waybill>> {
        Ok(Repo::<Waybill>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn get_waybill(&self, id: &str) -> RequestResult<Waybill> {
        Ok(Repo::<Waybill>::get(&mut self.database.auto(), id).await?)
    }

    pub async fn get_event(&self, id: &str) -> RequestResult<Event> {
        Ok(Repo::<Event>::get(&mut self.database.auto(), id).await?)
    }

    /// All events, or only those posted after `after`.
    pub async fn get_events(
        &self,
        after: Option<DateTime<Utc>>,
    ) -> RequestResult<Vec<Event>> {
        Ok(self.database.auto().events_posted_after(after).await?)
    }
}

// waybill views

impl<D> Client<D>
where
    D: Database,
{
    /// The railcar a waybill was issued for.
    pub async fn waybill_equipment(&self, id: &str) -> RequestResult<Vec<Equipment>> {
        let waybill = self.get_waybill(id).await?;
        self.database
            .auto()
            .by_equipment_id(&waybill.equipment_id)
            .await?
            .let_owned(Ok)
    }

    pub async fn waybill_events(
        &self,
        id: &str,
        after: Option<DateTime<Utc>>,
    ) -> RequestResult<Vec<Event>> {
        let waybill = self.get_waybill(id).await?;
        self.database
            .auto()
            .events_by_waybill(&waybill.id, after)
            .await?
            .let_owned(Ok)
    }

    /// Origin and destination of a waybill, in that order. Locations which
    /// are not stored are left out.
    pub async fn waybill_locations(&self, id: &str) -> RequestResult<Vec<Location>> {
        let waybill = self.get_waybill(id).await?;
        let ids = vec![waybill.origin_id, waybill.destination_id];
        let mut locations = self.database.auto().get_many(&ids).await?;
        locations.sort_by_key(|location| ids.iter().position(|id| *id == location.id));
        Ok(locations)
    }

    pub async fn waybill_route(&self, id: &str) -> RequestResult<Vec<RouteHop>> {
        self.get_waybill(id)
            .await?
            .route()
            .map_err(RequestError::other)
    }

    pub async fn waybill_parties(&self, id: &str) -> RequestResult<Vec<Party>> {
        self.get_waybill(id)
            .await?
            .parties()
            .map_err(RequestError::other)
    }
}
