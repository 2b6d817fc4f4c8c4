use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Entity, EntityKind, ExampleData};

/// A sighting of a railcar reported by a railroad.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
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

impl Entity for Event {
    const KIND: EntityKind = EntityKind::Events;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ExampleData for Event {
    fn example_data() -> Self {
        Self {
            id: "1".to_owned(),
            equipment_id: "TILX 290110".to_owned(),
            sighting_date: DateTime::<Utc>::from_timestamp(1_704_164_645, 0),
            sighting_event_code: "A".to_owned(),
            reporting_railroad_scac: "BNSF".to_owned(),
            posting_date: DateTime::<Utc>::from_timestamp(1_704_165_000, 0),
            from_mark_id: "BNSF".to_owned(),
            load_empty_status: "L".to_owned(),
            sighting_claim_code: "AA".to_owned(),
            sighting_event_code_text: "Arrival at Intermediate Station".to_owned(),
            train_id: "MKCKBAR1".to_owned(),
            train_alpha_code: "M".to_owned(),
            location_id: "1".to_owned(),
            waybill_id: "1".to_owned(),
        }
    }
}
