pub use crate::common::RouteResult;

use std::env;

use axum::{routing::on, Router};
use common::{route_not_found, METHOD_FILTER_ALL};
use railcar::{client::Client, database::Database};
use tokio::net::TcpListener;

pub mod api;
pub mod common;
pub mod hateoas;
pub mod middleware;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

#[derive(Clone)]
pub struct WebState<D: Database> {
    pub client: Client<D>,
}

impl<D: Database> WebState<D> {
    pub fn new(database: D) -> Self {
        Self {
            client: Client::new(database),
        }
    }
}

/// `WEB_BIND_ADDRESS`, or [`DEFAULT_BIND_ADDRESS`] if it is not set.
pub fn bind_address_from_env() -> String {
    env::var("WEB_BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_owned())
}

pub fn router<D: Database>(state: WebState<D>) -> Router {
    Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

pub async fn start_web_server<D: Database>(
    state: WebState<D>,
    address: &str,
) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state).into_make_service()).await?;

    Ok(())
}
