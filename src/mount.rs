//! The bridge between resources and the router.
//!
//! [`ResourceMount`] owns one resource value and a verb→operation table.
//! Each `with_*` wiring method is bounded on the matching capability
//! trait, so a verb can only be wired when the resource actually
//! implements it — the static replacement for synthesizing a handler
//! class and stripping unsupported verbs at runtime. Verbs that were
//! never wired are never registered: the framework answers them with
//! 405 (route exists) or 404 (no route) on its own.
//!
//! Dispatch per request: buffer the body, build a
//! [`RequestContext`], run the resource's authentication check, invoke
//! the wired operation, and shape the result (envelope for lists,
//! status per verb table, errors through the configured debug flag).

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::MethodRouter;
use serde::Serialize;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::context::RequestContext;
use crate::error::BridgeError;
use crate::resource::{
    BulkDeleter, BulkUpdater, Creator, Deleter, Detailer, Lister, Resource, Updater,
};
use crate::response::{empty_response, envelope, json_response};
use crate::verb::{Mode, Verb, VerbSet};

/// What a wired operation produced, before response shaping.
#[derive(Debug)]
enum Payload {
    /// Serialized items, to be enveloped.
    Many(Vec<Value>),
    /// A single serialized item.
    One(Value),
    /// No body.
    Empty,
}

type OpFuture = Pin<Box<dyn Future<Output = Result<Payload, BridgeError>> + Send>>;
type Operation = Arc<dyn Fn(RequestContext, Option<String>) -> OpFuture + Send + Sync>;

/// Mounts one resource as a pair of routes (collection and item).
///
/// ```ignore
/// let router = ResourceMount::new(posts)
///     .with_list()
///     .with_detail()
///     .with_create()
///     .into_router("/api/v1/posts");
/// ```
pub struct ResourceMount<R> {
    resource: Arc<R>,
    config: BridgeConfig,
    ops: HashMap<Verb, Operation>,
}

impl<R> fmt::Debug for ResourceMount<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wired: VerbSet = self.ops.keys().copied().collect();
        f.debug_struct("ResourceMount")
            .field("resource", &std::any::type_name::<R>())
            .field("config", &self.config)
            .field("wired", &wired)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceMount<R> {
    /// Creates a mount with the default [`BridgeConfig`].
    #[must_use]
    pub fn new(resource: R) -> Self {
        Self::with_config(resource, BridgeConfig::default())
    }

    /// Creates a mount with an explicit configuration.
    #[must_use]
    pub fn with_config(resource: R, config: BridgeConfig) -> Self {
        Self {
            resource: Arc::new(resource),
            config,
            ops: HashMap::new(),
        }
    }

    /// Wires `GET` on the collection route to [`Lister::list`].
    #[must_use]
    pub fn with_list(mut self) -> Self
    where
        R: Lister,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::List,
            Arc::new(move |ctx, _pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    let items = resource.list(&ctx).await?;
                    Ok(Payload::Many(to_values(items)?))
                })
            }),
        );
        self
    }

    /// Wires `GET` on the item route to [`Detailer::detail`].
    #[must_use]
    pub fn with_detail(mut self) -> Self
    where
        R: Detailer,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::Detail,
            Arc::new(move |ctx, pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    let pk = require_pk(pk)?;
                    match resource.detail(&ctx, &pk).await? {
                        Some(item) => Ok(Payload::One(serde_json::to_value(item)?)),
                        None => Err(BridgeError::NotFound(pk)),
                    }
                })
            }),
        );
        self
    }

    /// Wires `POST` on the collection route to [`Creator::create`].
    #[must_use]
    pub fn with_create(mut self) -> Self
    where
        R: Creator,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::Create,
            Arc::new(move |ctx, _pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    match resource.create(&ctx).await? {
                        Some(item) => Ok(Payload::One(serde_json::to_value(item)?)),
                        None => Ok(Payload::Empty),
                    }
                })
            }),
        );
        self
    }

    /// Wires `PUT` on the item route to [`Updater::update`].
    #[must_use]
    pub fn with_update(mut self) -> Self
    where
        R: Updater,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::Update,
            Arc::new(move |ctx, pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    let pk = require_pk(pk)?;
                    match resource.update(&ctx, &pk).await? {
                        Some(item) => Ok(Payload::One(serde_json::to_value(item)?)),
                        None => Ok(Payload::Empty),
                    }
                })
            }),
        );
        self
    }

    /// Wires `DELETE` on the item route to [`Deleter::delete`].
    #[must_use]
    pub fn with_delete(mut self) -> Self
    where
        R: Deleter,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::Delete,
            Arc::new(move |ctx, pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    let pk = require_pk(pk)?;
                    resource.delete(&ctx, &pk).await?;
                    Ok(Payload::Empty)
                })
            }),
        );
        self
    }

    /// Wires `PUT` on the collection route to [`BulkUpdater::update_all`].
    #[must_use]
    pub fn with_update_all(mut self) -> Self
    where
        R: BulkUpdater,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::UpdateAll,
            Arc::new(move |ctx, _pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    match resource.update_all(&ctx).await? {
                        Some(items) => Ok(Payload::Many(to_values(items)?)),
                        None => Ok(Payload::Empty),
                    }
                })
            }),
        );
        self
    }

    /// Wires `DELETE` on the collection route to
    /// [`BulkDeleter::delete_all`].
    #[must_use]
    pub fn with_delete_all(mut self) -> Self
    where
        R: BulkDeleter,
    {
        let resource = Arc::clone(&self.resource);
        self.ops.insert(
            Verb::DeleteAll,
            Arc::new(move |ctx, _pk| -> OpFuture {
                let resource = Arc::clone(&resource);
                Box::pin(async move {
                    resource.delete_all(&ctx).await?;
                    Ok(Payload::Empty)
                })
            }),
        );
        self
    }

    /// Verbs wired on the collection route.
    #[must_use]
    pub fn collection_verbs(&self) -> VerbSet {
        self.ops
            .keys()
            .copied()
            .filter(|verb| verb.mode() == Mode::Collection)
            .collect()
    }

    /// Verbs wired on the item route.
    #[must_use]
    pub fn item_verbs(&self) -> VerbSet {
        self.ops
            .keys()
            .copied()
            .filter(|verb| verb.mode() == Mode::Item)
            .collect()
    }

    /// Builds the router: `<path>` for collection verbs and
    /// `<path>/{pk}` for item verbs, registering only wired verbs.
    /// Routes with no wired verbs are not registered at all.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route path (axum requires a
    /// leading `/`).
    #[must_use]
    pub fn into_router<S>(self, path: &str) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let collection = self.collection_verbs();
        let item = self.item_verbs();
        let Self {
            resource,
            config,
            ops,
        } = self;
        let ops = Arc::new(ops);

        let mut router = Router::new();

        let mut collection_routes: Option<MethodRouter<S>> = None;
        for verb in collection.iter() {
            let resource = Arc::clone(&resource);
            let ops = Arc::clone(&ops);
            let config = config.clone();
            let handler = move |request: Request| {
                let resource = Arc::clone(&resource);
                let ops = Arc::clone(&ops);
                let config = config.clone();
                async move { dispatch(resource, ops, config, verb, None, request).await }
            };
            collection_routes = Some(match collection_routes {
                Some(routes) => routes.on(verb.method_filter(), handler),
                None => axum::routing::on(verb.method_filter(), handler),
            });
        }
        if let Some(routes) = collection_routes {
            router = router.route(path, routes);
        }

        let mut item_routes: Option<MethodRouter<S>> = None;
        for verb in item.iter() {
            let resource = Arc::clone(&resource);
            let ops = Arc::clone(&ops);
            let config = config.clone();
            let handler = move |Path(pk): Path<String>, request: Request| {
                let resource = Arc::clone(&resource);
                let ops = Arc::clone(&ops);
                let config = config.clone();
                async move { dispatch(resource, ops, config, verb, Some(pk), request).await }
            };
            item_routes = Some(match item_routes {
                Some(routes) => routes.on(verb.method_filter(), handler),
                None => axum::routing::on(verb.method_filter(), handler),
            });
        }
        if let Some(routes) = item_routes {
            let item_path = format!("{path}/{{pk}}");
            router = router.route(&item_path, routes);
        }

        router
    }
}

/// Serializes owned items to JSON values, preserving order.
fn to_values<T: Serialize>(items: Vec<T>) -> Result<Vec<Value>, BridgeError> {
    let mut values = Vec::with_capacity(items.len());
    for item in items {
        values.push(serde_json::to_value(item)?);
    }
    Ok(values)
}

/// Item operations are only wired on the item route, which always
/// extracts a path identifier.
fn require_pk(pk: Option<String>) -> Result<String, BridgeError> {
    pk.ok_or_else(|| {
        BridgeError::Internal("item operation dispatched without identifier".to_string())
    })
}

async fn dispatch<R: Resource>(
    resource: Arc<R>,
    ops: Arc<HashMap<Verb, Operation>>,
    config: BridgeConfig,
    verb: Verb,
    pk: Option<String>,
    request: Request,
) -> Response {
    let debug = config.debug;
    let max_body = config.max_body_bytes;
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, max_body).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return BridgeError::BadRequest(format!("unreadable request body: {err}"))
                .into_response_with(debug);
        }
    };
    let ctx = RequestContext::new(parts, bytes, config);
    tracing::debug!(method = %ctx.method(), path = ctx.uri().path(), ?verb, "dispatching");

    if !resource.is_authenticated(&ctx) {
        tracing::warn!(
            method = %ctx.method(),
            path = ctx.uri().path(),
            "request failed authentication"
        );
        return BridgeError::Unauthorized.into_response_with(debug);
    }

    let Some(op) = ops.get(&verb) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    match op(ctx, pk).await {
        Ok(payload) => match shape(verb, payload, resource.envelope_key()) {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(error = %err, ?verb, "response serialization failed");
                err.into_response_with(debug)
            }
        },
        Err(err) => {
            tracing::warn!(error = %err, ?verb, "resource operation failed");
            err.into_response_with(debug)
        }
    }
}

/// Shapes a payload into the final response for the verb.
fn shape(verb: Verb, payload: Payload, key: &str) -> Result<Response, BridgeError> {
    let status = verb.success_status();
    match payload {
        Payload::Many(values) => json_response(status, &envelope(key, values)),
        Payload::One(value) => json_response(status, &value),
        Payload::Empty => Ok(empty_response(status)),
    }
}
