use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Entity, EntityKind, ExampleData};

/// A shipping document moving one railcar from an origin to a destination.
///
/// `routes` and `parties` are stored exactly as they were received. They are
/// only parsed when a route or party view is requested, see
/// [`Waybill::route`] and [`Waybill::parties`].
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Waybill {
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

    /// Flag stored as an integer, `0` meaning unset.
    pub allowable_weight: i64,

    /// Flag stored as an integer, `0` meaning unset.
    pub dunnage_weight: i64,
    pub equipment_weight_code: String,
    pub commodity_code: String,
    pub commodity_description: String,

    /// Foreign ID referencing `locations.id`.
    pub origin_id: String,

    /// Foreign ID referencing `locations.id`.
    pub destination_id: String,

    /// JSON array of [`RouteHop`]s.
    pub routes: String,

    /// JSON array of [`Party`]s.
    pub parties: String,
}

impl Waybill {
    /// Parses the carrier hand-off sequence.
    pub fn route(&self) -> serde_json::Result<Vec<RouteHop>> {
        serde_json::from_str(&self.routes)
    }

    /// Parses the parties involved in the shipment.
    pub fn parties(&self) -> serde_json::Result<Vec<Party>> {
        serde_json::from_str(&self.parties)
    }
}

impl Entity for Waybill {
    const KIND: EntityKind = EntityKind::Waybills;

    fn id(&self) -> &str {
        &self.id
    }
}

impl ExampleData for Waybill {
    fn example_data() -> Self {
        Self {
            id: "1".to_owned(),
            equipment_id: "TILX 290110".to_owned(),
            waybill_date: DateTime::<Utc>::from_timestamp(1_704_164_645, 0),
            waybill_number: "482910".to_owned(),
            created_date: DateTime::<Utc>::from_timestamp(1_704_164_645, 0),
            billing_road_mark_name: "BNSF".to_owned(),
            waybill_source_code: "E".to_owned(),
            load_empty_status: "L".to_owned(),
            origin_mark_name: "BNSF".to_owned(),
            destination_mark_name: "UP".to_owned(),
            sending_road_mark: "BNSF".to_owned(),
            bill_of_lading_number: "BOL-1193".to_owned(),
            bill_of_lading_date: None,
            equipment_weight: 263_000,
            tare_weight: 67_000,
            allowable_weight: 0,
            dunnage_weight: 0,
            equipment_weight_code: "A".to_owned(),
            commodity_code: "2818184".to_owned(),
            commodity_description: "SODIUM HYDROXIDE".to_owned(),
            origin_id: "1".to_owned(),
            destination_id: "2".to_owned(),
            routes: r#"[{"scac":"BNSF","junction":"KCK"},{"scac":"UP"}]"#.to_owned(),
            parties: r#"[{"name":"Acme Chemicals","type":"shipper"}]"#.to_owned(),
        }
    }
}

/// One carrier in the route of a waybill. `junction` is where the car is
/// handed to the next carrier; the last hop has none.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RouteHop {
    pub scac: String,
    pub junction: Option<String>,
}

/// A party named on a waybill. Its fields are defined by the waybill issuer
/// and are passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Party(pub Map<String, Value>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_keeps_hop_order() {
        let route = Waybill::example_data().route().unwrap();
        assert_eq!(
            route,
            vec![
                RouteHop {
                    scac: "BNSF".to_owned(),
                    junction: Some("KCK".to_owned()),
                },
                RouteHop {
                    scac: "UP".to_owned(),
                    junction: None,
                },
            ]
        );
    }

    #[test]
    fn parties_pass_fields_through() {
        let parties = Waybill::example_data().parties().unwrap();
        assert_eq!(parties.len(), 1);
        assert_eq!(parties[0].0.get("type"), Some(&Value::from("shipper")));
    }

    #[test]
    fn malformed_routes_fail_on_read() {
        let waybill = Waybill {
            routes: "[{".to_owned(),
            ..Waybill::example_data()
        };
        assert!(waybill.route().is_err());
    }

    #[test]
    fn serializes_camel_case_without_empty_dates() {
        let json = serde_json::to_value(Waybill::example_data()).unwrap();
        assert!(json.get("billOfLadingNumber").is_some());
        assert!(json.get("billOfLadingDate").is_none());
    }
}
