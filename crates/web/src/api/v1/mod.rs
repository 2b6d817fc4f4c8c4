use axum::{routing::on, Router};
use railcar::database::Database;

use crate::{
    common::{route_not_found, METHOD_FILTER_ALL},
    WebState,
};

mod equipment;
mod events;
mod locations;
mod waybills;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .nest_service("/locations", locations::routes(state.clone()))
        .nest_service("/equipment", equipment::routes(state.clone()))
        .nest_service("/waybills", waybills::routes(state.clone()))
        .nest_service("/events", events::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
