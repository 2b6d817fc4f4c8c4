use axum::{
    extract::{rejection::QueryRejection, OriginalUri, Query, Request},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::MethodFilter,
    Json,
};
use chrono::{DateTime, Utc};
use model::ExampleData;
use railcar::RequestError;
use schemars::{schema_for, schema_for_value, JsonSchema};
use serde::{Deserialize, Serialize};
use utility::serde::date_time;

use crate::hateoas;

pub type RouteResult<O> = Result<O, RouteErrorResponse>;
pub type HateoasResult<O> = RouteResult<Json<hateoas::Response<O>>>;

/// A `MethodFilter` that matches all http methods.
pub(crate) const METHOD_FILTER_ALL: MethodFilter = MethodFilter::GET
    .or(MethodFilter::POST)
    .or(MethodFilter::PATCH)
    .or(MethodFilter::PUT)
    .or(MethodFilter::DELETE);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VecResponse<T> {
    pub data: Vec<T>,
}

impl<T> VecResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn hateoas(self) -> hateoas::Response<Self> {
        hateoas::Response::new(self)
    }
}

// - Query parameters -

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AfterParams {
    /// Only records posted strictly after this RFC 3339 timestamp.
    #[serde(deserialize_with = "date_time::deserialize_utc_option", default)]
    pub after: Option<DateTime<Utc>>,
}

/// Unwraps the `after` parameter. A value that is not RFC 3339 is a bad request.
pub(crate) fn after_param(
    params: Result<Query<AfterParams>, QueryRejection>,
    uri: &str,
) -> RouteResult<Option<DateTime<Utc>>> {
    params
        .map(|Query(params)| params.after)
        .map_err(|why| {
            RouteErrorResponse::bad_request(&Method::GET, uri)
                .with_detailed_information(why.body_text())
        })
}

/// The response to a GET request at `uri` that failed with `why`.
pub fn error_response(why: RequestError, uri: &str) -> RouteErrorResponse {
    RouteErrorResponse::from(why)
        .with_method(&Method::GET)
        .with_uri(uri)
}

// - Services returning commonly used responses -

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SchemaParams {
    #[serde(default = "Default::default")]
    example_data: bool,
}

pub(crate) async fn schema<T: ExampleData + JsonSchema + Serialize>(
    Query(params): Query<SchemaParams>,
) -> impl IntoResponse {
    if params.example_data {
        Json(schema_for_value!(T::example_data()))
    } else {
        Json(schema_for!(T))
    }
}

pub(crate) async fn route_not_found(
    OriginalUri(original_uri): OriginalUri,
    req: Request,
) -> impl IntoResponse {
    RouteErrorResponse::not_found(req.method(), original_uri.path())
}

// - Commonly used responeses -

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteErrorResponse {
    #[serde(skip)]
    pub status_code: StatusCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_method: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_uri: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_information: Option<String>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            http_method: None,
            requested_uri: None,
            message: None,
            detailed_information: None,
        }
    }

    pub fn not_found(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn bad_request(method: &Method, uri: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST)
            .with_method(method)
            .with_uri(uri)
            .with_default_message()
    }

    pub fn with_method(mut self, method: &Method) -> Self {
        self.http_method = Some(method.to_string());
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.requested_uri = Some(uri.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_default_message(self) -> Self {
        let message = self
            .status_code
            .canonical_reason()
            .unwrap_or("unknown error");
        self.with_message(message)
    }

    pub fn with_detailed_information(mut self, message: impl Into<String>) -> Self {
        self.detailed_information = Some(message.into());
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        match value {
            RequestError::NotFound => Self::new(StatusCode::NOT_FOUND)
                .with_message("The requested item does not exist."),
            RequestError::Other(other) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR).with_message(format!("{}", other))
            }
        }
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            log::error!(
                "{} {}: {}",
                self.http_method.as_deref().unwrap_or("?"),
                self.requested_uri.as_deref().unwrap_or("?"),
                self.message.as_deref().unwrap_or("")
            );
        }
        (self.status_code, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_status_codes() {
        assert_eq!(
            RouteErrorResponse::from(RequestError::NotFound).status_code,
            StatusCode::NOT_FOUND
        );

        let response = RouteErrorResponse::from(RequestError::Other("disk on fire".into()));
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.message.as_deref(), Some("disk on fire"));
    }

    #[test]
    fn status_code_is_not_serialized() {
        let body = serde_json::to_value(
            RouteErrorResponse::not_found(&Method::GET, "/api/v2").with_detailed_information("x"),
        )
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "httpMethod": "GET",
                "requestedUri": "/api/v2",
                "message": "Not Found",
                "detailedInformation": "x",
            })
        );
    }

    #[test]
    fn error_response_names_the_failed_request() {
        let response = error_response(RequestError::NotFound, "/api/v1/waybills/7/route");
        assert_eq!(response.status_code, StatusCode::NOT_FOUND);
        assert_eq!(response.http_method.as_deref(), Some("GET"));
        assert_eq!(
            response.requested_uri.as_deref(),
            Some("/api/v1/waybills/7/route")
        );
    }
}
