use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    routing::{get, on},
    Extension, Router,
};
use model::equipment::Equipment;
use railcar::database::Database;
use utility::let_also::LetAlso;

use crate::{
    common::{
        error_response, route_not_found, schema, HateoasResult, VecResponse,
        METHOD_FILTER_ALL,
    },
    hateoas,
    middleware::base_url::{base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/equipment{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<Equipment>))
        .route("/:id", get(get_equipment_item::<D>))
        .route("/", get(get_equipment::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_equipment<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Equipment>>> {
    client
        .get_equipment()
        .await
        .map(|equipment| equipment_list_hateoas(equipment, resource!(""), base_url))
        .map_err(|why| error_response(why, original_uri.path()))
}

async fn get_equipment_item<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Equipment> {
    client
        .get_equipment_item(&id)
        .await
        .map(|equipment| equipment_hateoas(equipment, base_url).json())
        .map_err(|why| error_response(why, original_uri.path()))
}

/// Wraps a list of railcars, `path` being the path the list was requested at.
pub(crate) fn equipment_list_hateoas(
    equipment: Vec<Equipment>,
    path: String,
    base_url: Arc<BaseUrl>,
) -> axum::Json<hateoas::Response<VecResponse<hateoas::Response<Equipment>>>> {
    equipment
        .into_iter()
        .map(|equipment| equipment_hateoas(equipment, base_url.clone()))
        .collect::<Vec<_>>()
        .let_owned(|data| {
            hateoas::Response::builder(VecResponse::new(data), base_url)
                .link("self", path)
                .build()
                .json()
        })
}

pub(crate) fn equipment_hateoas(
    equipment: Equipment,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<Equipment> {
    let id = equipment.id.clone();
    hateoas::Response::builder(equipment, base_url)
        .link("self", resource!("/{}", id))
        .build()
}
