//! HTTP Server
//!
//! axum bindings for the relay. Both flavors share [`ChatProxy`]; they differ
//! only in which methods the router lets through.

use crate::config::{Flavor, RelayConfig};
use crate::proxy::{ChatProxy, ProxyRequest, ProxyResponse};
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get, post};
use axum::Router;
use std::sync::Arc;

impl IntoResponse for ProxyResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            self.body,
        )
            .into_response()
    }
}

/// Handler bound to every method; the proxy itself rejects non-POST.
pub fn standalone_router(proxy: Arc<ChatProxy>) -> Router {
    let path = proxy.config().route_path.clone();
    Router::new()
        .route(&path, any(relay))
        .with_state(proxy)
}

/// Handler bound to POST only; other methods are turned away by the router.
pub fn routed_router(proxy: Arc<ChatProxy>) -> Router {
    let path = proxy.config().route_path.clone();
    Router::new()
        .route(&path, post(relay))
        .with_state(proxy)
}

/// Full application: the flavor's relay route, health check and body limit
pub fn app(proxy: Arc<ChatProxy>) -> Router {
    let max_request_bytes = proxy.config().max_request_bytes;
    let relay_routes = match proxy.flavor() {
        Flavor::Standalone => standalone_router(proxy),
        Flavor::Routed => routed_router(proxy),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .merge(relay_routes)
        .layer(DefaultBodyLimit::max(max_request_bytes))
}

/// Build the proxy from config and return the application router
pub fn app_from_config(config: RelayConfig) -> crate::Result<Router> {
    let proxy = ChatProxy::new(config)?;
    Ok(app(Arc::new(proxy)))
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn relay(State(proxy): State<Arc<ChatProxy>>, method: Method, body: Bytes) -> Response {
    proxy
        .handle(ProxyRequest { method, body })
        .await
        .into_response()
}
