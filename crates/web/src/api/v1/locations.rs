use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    routing::{get, on},
    Extension, Router,
};
use model::location::Location;
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
        crate::api::v1::resource!("/locations{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .route("/schema", get(schema::<Location>))
        .route("/:id", get(get_location::<D>))
        .route("/", get(get_locations::<D>))
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

async fn get_locations<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<Location>>> {
    client
        .get_locations()
        .await
        .map(|locations| {
            locations
                .into_iter()
                .map(|location| location_hateoas(location, base_url.clone()))
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

async fn get_location<D: Database>(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<String>,
    State(WebState { client }): State<WebState<D>>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<Location> {
    client
        .get_location(&id)
        .await
        .map(|location| location_hateoas(location, base_url).json())
        .map_err(|why| error_response(why, original_uri.path()))
}

pub(crate) fn location_hateoas(
    location: Location,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<Location> {
    let id = location.id.clone();
    hateoas::Response::builder(location, base_url)
        .link("self", resource!("/{}", id))
        .build()
}
