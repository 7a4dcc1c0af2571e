//! restmount demo server.
//!
//! Mounts an in-memory posts resource under `/api/v1/posts` and serves
//! it with axum. `GET` endpoints are open; mutating endpoints require an
//! `Authorization` header to be present.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::Method;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use restmount::config::ServerConfig;
use restmount::context::RequestContext;
use restmount::error::BridgeError;
use restmount::mount::ResourceMount;
use restmount::resource::{Creator, Deleter, Detailer, Lister, Resource};

/// A stored post.
#[derive(Debug, Clone, Serialize)]
struct Post {
    id: uuid::Uuid,
    title: String,
    created_at: DateTime<Utc>,
}

/// Request body for creating a post.
#[derive(Debug, Deserialize)]
struct NewPost {
    title: String,
}

/// In-memory post store.
#[derive(Debug, Default)]
struct PostResource {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl Resource for PostResource {
    type Item = Post;

    fn is_authenticated(&self, ctx: &RequestContext) -> bool {
        ctx.method() == Method::GET || ctx.header("authorization").is_some()
    }
}

#[async_trait]
impl Lister for PostResource {
    async fn list(&self, _ctx: &RequestContext) -> Result<Vec<Post>, BridgeError> {
        Ok(self.posts.read().await.clone())
    }
}

#[async_trait]
impl Detailer for PostResource {
    async fn detail(&self, _ctx: &RequestContext, pk: &str) -> Result<Option<Post>, BridgeError> {
        let id: uuid::Uuid = pk
            .parse()
            .map_err(|_| BridgeError::BadRequest(format!("invalid post id: {pk}")))?;
        Ok(self.posts.read().await.iter().find(|post| post.id == id).cloned())
    }
}

#[async_trait]
impl Creator for PostResource {
    async fn create(&self, ctx: &RequestContext) -> Result<Option<Post>, BridgeError> {
        let new: NewPost = ctx.json()?;
        let post = Post {
            id: uuid::Uuid::new_v4(),
            title: new.title,
            created_at: Utc::now(),
        };
        self.posts.write().await.push(post.clone());
        tracing::info!(post_id = %post.id, "post created");
        Ok(Some(post))
    }
}

#[async_trait]
impl Deleter for PostResource {
    async fn delete(&self, _ctx: &RequestContext, pk: &str) -> Result<(), BridgeError> {
        let id: uuid::Uuid = pk
            .parse()
            .map_err(|_| BridgeError::BadRequest(format!("invalid post id: {pk}")))?;
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|post| post.id != id);
        if posts.len() == before {
            return Err(BridgeError::NotFound(pk.to_string()));
        }
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }
}

/// `GET /health` — service health status.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, debug = config.bridge.debug, "starting restmount demo");

    // Mount the posts resource
    let posts = ResourceMount::with_config(PostResource::default(), config.bridge.clone())
        .with_list()
        .with_detail()
        .with_create()
        .with_delete()
        .into_router("/api/v1/posts");

    // Build router
    let app = Router::new()
        .merge(posts)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
