use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Path, Query, State},
    routing::{get, on},
    Extension, Router,
};
use model::event::Event;
use railcar::database::Database;
use utility::let_also::LetAlso;

use crate::{
    common::{
        after_param, error_response, route_not_found, schema, AfterParams,
        HateoasResult, VecResponse, METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/events{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<Event>))
        .route("/:id", get(get_event::<D>))
        .route("/", get(get_events::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_events<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    params: Result<Query<AfterParams>, QueryRejection>,
) -> HateoasResult<VecResponse<hateoas::Response<Event>>> {
    let after = after_param(params, original_uri.path())?;
    client
        .get_events(after)
        .await
        .map(|events| event_list_hateoas(events, resource!(""), base_url))
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_event<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Event> {
    client
        .get_event(&id)
        .await
        .map(|event| event_hateoas(event, base_url).json())
        .map_err(|why| error_response(why, original_uri.path()))
}

pub(crate) fn event_list_hateoas(
    events: Vec<Event>,
    path: String,
    base_url: Arc<BaseUrl>,
) -> axum::Json<hateoas::Response<VecResponse<hateoas::Response<Event>>>> {
    events
        .into_iter()
        .map(|event| event_hateoas(event, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| {
            hateoas::Response::builder(VecResponse::new(data), base_url)
                .link("self", path)
                .build()
                .json()
        })
}

/// Links an event to the waybill it was reported for and the location it
/// was sighted at, when those references are set.
pub(crate) fn event_hateoas(event: Event, base_url: Arc<BaseUrl>) -> hateoas::Response<Event> {
    let id = event.id.clone();
    let waybill = (!event.waybill_id.is_empty())
        .then(|| super::waybills::resource!("/{}", event.waybill_id));
    let location = (!event.location_id.is_empty())
        .then(|| super::locations::resource!("/{}", event.location_id));
    hateoas::Response::builder(event, base_url)
        .link("self", resource!("/{}", id))
        .link_option("waybill", waybill)
        .link_option("location", location)
        .build()
}
