//! Resource abstraction: the base trait plus one capability trait per
//! operation.
//!
//! A resource implements [`Resource`] and whichever capability traits it
//! supports. The mount wires each capability to its HTTP verb at
//! construction time; a capability the resource does not implement cannot
//! be wired at all, so the corresponding verb never appears on the route.
//!
//! All capability methods are `async` via [`async_trait`]: a resource
//! whose data is immediately available simply returns without awaiting,
//! and both kinds produce identical responses for the same data.

use async_trait::async_trait;
use axum::http::Method;
use serde::Serialize;

use crate::context::RequestContext;
use crate::error::BridgeError;

/// Base trait every mountable resource implements.
pub trait Resource: Send + Sync + 'static {
    /// Record type the resource serves. Serialized verbatim in detail
    /// responses and inside the list envelope.
    type Item: Serialize + Send + Sync;

    /// Authentication check, run before every operation.
    ///
    /// The default policy allows `GET` and denies everything else;
    /// override to inspect credentials on the [`RequestContext`].
    fn is_authenticated(&self, ctx: &RequestContext) -> bool {
        ctx.method() == Method::GET
    }

    /// Key under which list responses are wrapped.
    fn envelope_key(&self) -> &'static str {
        "objects"
    }
}

/// Capability: `GET` on the collection route.
#[async_trait]
pub trait Lister: Resource {
    /// Returns all items, in the order they should appear in the
    /// response envelope.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the listing fails.
    async fn list(&self, ctx: &RequestContext) -> Result<Vec<Self::Item>, BridgeError>;
}

/// Capability: `GET` on the item route.
#[async_trait]
pub trait Detailer: Resource {
    /// Returns the item with the given identifier, or `None` when absent
    /// (mapped to a 404 response by the mount).
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the lookup fails.
    async fn detail(
        &self,
        ctx: &RequestContext,
        pk: &str,
    ) -> Result<Option<Self::Item>, BridgeError>;
}

/// Capability: `POST` on the collection route.
#[async_trait]
pub trait Creator: Resource {
    /// Creates a record from the request. Returning the created item puts
    /// it in the 201 response body; returning `None` yields an empty 201.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when creation fails.
    async fn create(&self, ctx: &RequestContext) -> Result<Option<Self::Item>, BridgeError>;
}

/// Capability: `PUT` on the item route.
#[async_trait]
pub trait Updater: Resource {
    /// Updates the record with the given identifier. Returning the
    /// updated item puts it in the 202 response body.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the update fails.
    async fn update(
        &self,
        ctx: &RequestContext,
        pk: &str,
    ) -> Result<Option<Self::Item>, BridgeError>;
}

/// Capability: `DELETE` on the item route.
#[async_trait]
pub trait Deleter: Resource {
    /// Deletes the record with the given identifier. Success yields an
    /// empty 204.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the deletion fails.
    async fn delete(&self, ctx: &RequestContext, pk: &str) -> Result<(), BridgeError>;
}

/// Capability: `PUT` on the collection route.
#[async_trait]
pub trait BulkUpdater: Resource {
    /// Replaces or updates the whole collection. A returned list is
    /// enveloped in the 202 response body.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the bulk update fails.
    async fn update_all(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<Vec<Self::Item>>, BridgeError>;
}

/// Capability: `DELETE` on the collection route.
#[async_trait]
pub trait BulkDeleter: Resource {
    /// Deletes the whole collection. Success yields an empty 204.
    ///
    /// # Errors
    ///
    /// Returns a [`BridgeError`] when the bulk deletion fails.
    async fn delete_all(&self, ctx: &RequestContext) -> Result<(), BridgeError>;
}
