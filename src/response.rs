//! JSON response shaping.
//!
//! Every JSON response produced by the bridge carries the exact
//! `application/json; charset=UTF-8` content type. List responses are
//! wrapped in an envelope object under the resource's envelope key.

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::BridgeError;

/// Content type set on all JSON responses.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Serializes `body` and builds a response with the given status and the
/// bridge's JSON content type.
///
/// # Errors
///
/// Returns [`BridgeError::Serialization`] if `body` cannot be serialized.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Result<Response, BridgeError> {
    let payload = serde_json::to_string(body)?;
    let mut response = payload.into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    *response.status_mut() = status;
    Ok(response)
}

/// Builds a bodiless response with the given status.
#[must_use]
pub fn empty_response(status: StatusCode) -> Response {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}

/// Wraps list items in an envelope object: `{"<key>": [...]}`.
#[must_use]
pub fn envelope(key: &str, items: Vec<Value>) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_string(), Value::Array(items));
    Value::Object(map)
}
