use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Path, Query, State},
    routing::{get, on},
    Extension, Json, Router,
};
use model::{
    equipment::Equipment,
    event::Event,
    location::Location,
    waybill::{Party, RouteHop, Waybill},
};
use railcar::database::Database;
use utility::let_also::LetAlso;

use super::{
    equipment::equipment_list_hateoas, events::event_list_hateoas,
    locations::location_hateoas,
};
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
        crate::api::v1::resource!("/waybills{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<Waybill>))
        .route("/:id", get(get_waybill::<D>))
        .route("/:id/equipment", get(get_waybill_equipment::<D>))
        .route("/:id/events", get(get_waybill_events::<D>))
        .route("/:id/locations", get(get_waybill_locations::<D>))
        .route("/:id/route", get(get_waybill_route::<D>))
        .route("/:id/parties", get(get_waybill_parties::<D>))
        .route("/", get(get_waybills::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_waybills<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Waybill>>> {
    client
        .get_waybills()
        .await
        .map(|waybills| {
            waybills
                .into_iter()
                .map(|waybill| waybill_hateoas(waybill, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| {
                    hateoas::Response::builder(VecResponse::new(data), base_url)
                        .link("self", resource!(""))
                        .build()
                        .json()
                })
        })
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Waybill> {
    client
        .get_waybill(&id)
        .await
        .map(|waybill| waybill_hateoas(waybill, base_url).json())
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill_equipment<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Equipment>>> {
    client
        .waybill_equipment(&id)
        .await
        .map(|equipment| {
            equipment_list_hateoas(equipment, resource!("/{}/equipment", id), base_url)
        })
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill_events<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
    params: Result<Query<AfterParams>, QueryRejection>,
) -> HateoasResult<VecResponse<hateoas::Response<Event>>> {
    let after = after_param(params, original_uri.path())?;
    client
        .waybill_events(&id, after)
        .await
        .map(|events| event_list_hateoas(events, resource!("/{}/events", id), base_url))
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill_locations<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Location>>> {
    client
        .waybill_locations(&id)
        .await
        .map(|locations| {
            locations
                .into_iter()
                .map(|location| location_hateoas(location, base_url.clone()))
                .collect::<Vec<_>>()
                .let_owned(|data| {
                    hateoas::Response::builder(VecResponse::new(data), base_url)
                        .link("self", resource!("/{}/locations", id))
                        .link("waybill", resource!("/{}", id))
                        .build()
                        .json()
                })
        })
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill_route<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<RouteHop>> {
    client
        .waybill_route(&id)
        .await
        .map(|route| derived_view_hateoas(route, &id, "route", base_url))
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_waybill_parties<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<Party>> {
    client
        .waybill_parties(&id)
        .await
        .map(|parties| derived_view_hateoas(parties, &id, "parties", base_url))
        .map_err(|why| error_response(why, original_uri.path()))
}

fn derived_view_hateoas<T>(
    data: Vec<T>,
    id: &str,
    view: &str,
    base_url: Arc<BaseUrl>,
) -> Json<hateoas::Response<VecResponse<T>>> {
    hateoas::Response::builder(VecResponse::new(data), base_url)
        .link("self", resource!("/{}/{}", id, view))
        .link("waybill", resource!("/{}", id))
        .build()
        .json()
}

pub(crate) fn waybill_hateoas(
    waybill: Waybill,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<Waybill> {
    let id = waybill.id.clone();
    hateoas::Response::builder(waybill, base_url)
        .link("self", resource!("/{}", id))
        .link("equipment", resource!("/{}/equipment", id))
        .link("events", resource!("/{}/events", id))
        .link("locations", resource!("/{}/locations", id))
        .link("route", resource!("/{}/route", id))
        .link("parties", resource!("/{}/parties", id))
        .build()
}
