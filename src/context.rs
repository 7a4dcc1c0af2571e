//! Per-request context handed to resource methods.
//!
//! [`RequestContext`] is how the wrapped resource logic sees the inbound
//! request: method, URI, headers, and the raw body, plus the owning
//! mount's [`BridgeConfig`]. One context is built per request and consumed
//! by the dispatched operation.

use axum::body::Bytes;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;

use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Everything a resource method may ask about the inbound request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    config: BridgeConfig,
}

impl RequestContext {
    /// Builds a context from request parts, the buffered body, and the
    /// mount's configuration.
    #[must_use]
    pub fn new(parts: Parts, body: Bytes, config: BridgeConfig) -> Self {
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            config,
        }
    }

    /// HTTP method of the request.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// All request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw request body bytes.
    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Request body as a string.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedBody`] if the body is not valid
    /// UTF-8.
    pub fn body_utf8(&self) -> Result<&str, BridgeError> {
        std::str::from_utf8(&self.body)
            .map_err(|err| BridgeError::MalformedBody(format!("body is not valid UTF-8: {err}")))
    }

    /// Deserializes the request body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedBody`] if the body is not valid
    /// JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, BridgeError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| BridgeError::MalformedBody(err.to_string()))
    }

    /// The owning mount's configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Whether the owning mount runs in debug mode.
    #[must_use]
    pub fn is_debug(&self) -> bool {
        self.config.debug
    }
}
