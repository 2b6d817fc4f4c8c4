use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Entity, EntityKind, ExampleData};

/// A rail station or yard. Referenced by id from waybill origin and destination.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub city: String,
    pub city_long: String,
    pub station: String,

    /// Freight station accounting code.
    pub fsac: String,

    /// Standard carrier alpha code of the serving railroad.
    pub scac: String,

    /// Standard point location code.
    pub splc: String,
    pub state: String,
    pub time_zone: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub country: String,
}

impl Entity for Location {
    const KIND: EntityKind = EntityKind::Locations;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ExampleData for Location {
    fn example_data() -> Self {
        Self {
            id: "1".to_owned(),
            city: "KANSAS CITY".to_owned(),
            city_long: "KANSAS CITY".to_owned(),
            station: "ARGENTINE".to_owned(),
            fsac: "34400".to_owned(),
            scac: "BNSF".to_owned(),
            splc: "563500".to_owned(),
            state: "KS".to_owned(),
            time_zone: "CT".to_owned(),
            longitude: Some(-94.6786),
            latitude: Some(39.0814),
            country: "US".to_owned(),
        }
    }
}
