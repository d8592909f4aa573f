//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the transfer handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener, serve until shutdown
//! - Dispatch requests to the gateway core

use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::gateway;
use crate::http::request::{self, MakeUuidRequestId};
use crate::storage::{HttpObjectStore, StorageError};

/// Application state injected into handlers.
///
/// The store handle is the only shared resource: immutable, reused across
/// requests for connection pooling, never mutated per-request.
#[derive(Clone)]
pub struct AppState {
    pub store: HttpObjectStore,
}

/// HTTP server for the object gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, StorageError> {
        let store = HttpObjectStore::new(
            &config.storage,
            Duration::from_secs(config.timeouts.connect_secs),
        )?;

        let state = AppState { store };
        let router = Self::build_router(&config, state);

        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(transfer_handler))
            .route("/{*path}", any(transfer_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeUuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            bucket = %self.config.storage.bucket,
            endpoint = %self.config.storage.endpoint,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Main transfer handler.
/// Resolves the object key and hands over to the streaming gateway.
async fn transfer_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request::request_id(request.headers()).to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        "Inbound request"
    );

    let key = gateway::resolve_key(&path);
    gateway::stream::transfer(&state.store, key, &request_id).await
}
