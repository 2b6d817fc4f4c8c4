use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Entity, EntityKind, ExampleData};

/// A railcar in a customer's fleet.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub customer: String,
    pub fleet: String,

    /// Reporting mark and number, e.g. `TILX 290110`. Events and waybills refer to
    /// equipment by this value rather than by `id`.
    pub equipment_id: String,
    /// Passed through as given by the fleet owner.
    pub equipment_status: String,
    pub date_added: Option<DateTime<Utc>>,

    /// `None` while the car is still in service.
    pub date_removed: Option<DateTime<Utc>>,
}

impl Entity for Equipment {
    const KIND: EntityKind = EntityKind::Equipment;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ExampleData for Equipment {
    fn example_data() -> Self {
        Self {
            id: "1".to_owned(),
            customer: "Acme Chemicals".to_owned(),
            fleet: "Tank Fleet".to_owned(),
            equipment_id: "TILX 290110".to_owned(),
            equipment_status: "ACTIVE".to_owned(),
            date_added: DateTime::<Utc>::from_timestamp(1_577_836_800, 0),
            date_removed: None,
        }
    }
}
