//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the welcome and proxy handlers
//! - Wire up middleware (tracing with request ID, timeout, body limit)
//! - Serve over plain TCP or terminate TLS
//! - Stop gracefully when the shutdown coordinator fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{request::Parts, Request},
    response::{IntoResponse, Json, Response},
    routing::{get, on, MethodFilter},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::forwarding::{DispatchError, Forwarder, HttpDispatcher, InboundRequest};
use crate::http::request::request_id;
use crate::routing::RouteTable;

/// How long in-flight requests may drain after shutdown on the TLS listener.
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder<HttpDispatcher>>,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a server forwarding through `routes`.
    pub fn new(config: ProxyConfig, routes: RouteTable) -> Result<Self, DispatchError> {
        let dispatcher = HttpDispatcher::new(&config.timeouts)?;
        let state = AppState {
            forwarder: Arc::new(Forwarder::new(Arc::new(routes), dispatcher)),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let proxied = MethodFilter::GET
            .or(MethodFilter::POST)
            .or(MethodFilter::PUT)
            .or(MethodFilter::DELETE);

        Router::new()
            .route("/", get(welcome_handler))
            .route("/{*path}", on(proxied, proxy_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
    }

    /// The configured router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Serve plain HTTP on `listener` until shutdown is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS on `addr` until shutdown is signalled.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let shutdown_handle = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            shutdown_handle.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    tracing::debug_span!(
        "request",
        request_id = %request_id(request),
        method = %request.method(),
        uri = %request.uri(),
    )
}

async fn welcome_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the prefix proxy!" }))
}

/// Relay a request through the forwarder.
async fn proxy_handler(State(state): State<AppState>, parts: Parts, body: Bytes) -> Response {
    let request = InboundRequest::from_parts(&parts, body);
    match state.forwarder.handle(request).await {
        Ok(forwarded) => forwarded.into_response(),
        Err(e) => e.into_response(),
    }
}
