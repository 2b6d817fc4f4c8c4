use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use model::{
    equipment::Equipment, event::Event, location::Location, waybill::Waybill, EntityKind,
    ExampleData,
};
use railcar::{
    database::{Database, DatabaseOperations, Repo},
    memory::InMemoryDatabase,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use web::{router, WebState};

async fn app() -> Router {
    let database = InMemoryDatabase::new();
    let mut auto = database.auto();
    for kind in EntityKind::ALL {
        auto.ensure_schema(kind).await.unwrap();
    }

    auto.insert_all(&[
        Location::example_data(),
        Location {
            id: "2".to_owned(),
            city: "NORTH PLATTE".to_owned(),
            ..Location::example_data()
        },
    ])
    .await
    .unwrap();
    auto.insert_all(&[Equipment::example_data()]).await.unwrap();
    auto.insert_all(&[
        Waybill::example_data(),
        Waybill {
            id: "2".to_owned(),
            parties: "{".to_owned(),
            ..Waybill::example_data()
        },
    ])
    .await
    .unwrap();
    auto.insert_all(&[
        Event {
            id: "1".to_owned(),
            posting_date: DateTime::<Utc>::from_timestamp(1_704_000_000, 0),
            ..Event::example_data()
        },
        Event {
            id: "2".to_owned(),
            posting_date: DateTime::<Utc>::from_timestamp(1_705_000_000, 0),
            ..Event::example_data()
        },
        Event {
            id: "3".to_owned(),
            waybill_id: "2".to_owned(),
            posting_date: None,
            ..Event::example_data()
        },
    ])
    .await
    .unwrap();

    router(WebState::new(database))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("host", "rail.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

fn ids(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn ping() {
    let (status, body) = get(app().await, "/api/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong!" }));
}

#[tokio::test]
async fn lists_are_wrapped_in_data() {
    let (status, body) = get(app().await, "/api/v1/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["1", "2"]);
    assert_eq!(
        body["links"][0]["href"],
        "http://rail.example/api/v1/locations"
    );
    assert_eq!(
        body["data"][1]["links"][0]["href"],
        "http://rail.example/api/v1/locations/2"
    );
}

#[tokio::test]
async fn events_after_is_exclusive() {
    let app = app().await;

    let (_, body) = get(app.clone(), "/api/v1/events").await;
    assert_eq!(ids(&body), vec!["1", "2", "3"]);

    let (status, body) = get(app.clone(), "/api/v1/events?after=2024-01-01T00:00:00Z").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec!["2"]);

    // 1_705_000_000 is 2024-01-11T19:06:40Z
    let (_, body) = get(app, "/api/v1/events?after=2024-01-11T19:06:40Z").await;
    assert!(ids(&body).is_empty());
}

#[tokio::test]
async fn invalid_after_is_a_bad_request() {
    let (status, body) = get(app().await, "/api/v1/events?after=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["requestedUri"], "/api/v1/events");
}

#[tokio::test]
async fn waybill_links_to_its_views() {
    let (status, body) = get(app().await, "/api/v1/waybills/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "1");
    assert_eq!(body["equipmentWeight"], 263_000);

    let relations = body["links"]
        .as_array()
        .unwrap()
        .iter()
        .map(|link| link["rel"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        relations,
        vec!["self", "equipment", "events", "locations", "route", "parties"]
    );
}

#[tokio::test]
async fn waybill_views() {
    let app = app().await;

    let (_, body) = get(app.clone(), "/api/v1/waybills/1/equipment").await;
    assert_eq!(body["data"][0]["equipmentId"], "TILX 290110");

    let (_, body) = get(app.clone(), "/api/v1/waybills/1/events").await;
    assert_eq!(ids(&body), vec!["1", "2"]);

    let (_, body) = get(app.clone(), "/api/v1/waybills/1/locations").await;
    assert_eq!(ids(&body), vec!["1", "2"]);

    let (_, body) = get(app.clone(), "/api/v1/waybills/1/route").await;
    assert_eq!(
        body["data"],
        json!([{ "scac": "BNSF", "junction": "KCK" }, { "scac": "UP" }])
    );

    let (_, body) = get(app, "/api/v1/waybills/1/parties").await;
    assert_eq!(body["data"][0]["type"], "shipper");
}

#[tokio::test]
async fn unknown_waybill_is_not_found() {
    let app = app().await;
    for uri in [
        "/api/v1/waybills/404",
        "/api/v1/waybills/404/equipment",
        "/api/v1/waybills/404/route",
    ] {
        let (status, _) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn malformed_parties_are_a_server_error() {
    let (status, body) = get(app().await, "/api/v1/waybills/2/parties").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["requestedUri"], "/api/v1/waybills/2/parties");
}

#[tokio::test]
async fn schema_endpoint() {
    let app = app().await;

    let (status, body) = get(app.clone(), "/api/v1/equipment/schema").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Equipment");

    let (status, _) = get(app, "/api/v1/equipment/schema?exampleData=true").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, body) = get(app().await, "/api/v2/anything").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["requestedUri"], "/api/v2/anything");
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let app = app().await;
    let (status, _) = get(app.clone(), "/api/v1/locations/99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(app, "/api/v1/equipment/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["equipmentStatus"], "ACTIVE");
}
