//! Streaming Object Gateway
//!
//! Serves stored binary objects over HTTP by streaming them directly from a
//! backing object store, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                OBJECT GATEWAY                 │
//!                         │                                               │
//!     Client Request      │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!     ────────────────────┼─▶│  http   │──▶│ gateway  │──▶│  storage  │──┼──▶ Object
//!                         │  │ server  │   │ key+fsm  │   │  client   │  │     Store
//!                         │  └─────────┘   └──────────┘   └─────┬─────┘  │
//!                         │                                      │        │
//!     Client Response     │  ┌──────────┐                        │        │
//!     ◀───────────────────┼──│ response │◀───── byte stream ─────┘        │
//!                         │  │  relay   │      (backpressure)             │
//!                         │  └──────────┘                                 │
//!                         │                                               │
//!                         │  ┌─────────────────────────────────────────┐  │
//!                         │  │         Cross-Cutting Concerns          │  │
//!                         │  │  ┌────────┐ ┌─────────────┐ ┌────────┐  │  │
//!                         │  │  │ config │ │observability│ │lifecycle│ │  │
//!                         │  │  └────────┘ └─────────────┘ └────────┘  │  │
//!                         │  └─────────────────────────────────────────┘  │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use object_gateway::config::loader::load_config;
use object_gateway::http::HttpServer;
use object_gateway::lifecycle::{signals, Shutdown};
use object_gateway::observability;

#[derive(Parser, Debug)]
#[command(name = "object-gateway", about = "Streaming object gateway")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    observability::logging::init(&config.observability.log_level);

    tracing::info!("object-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        storage_endpoint = %config.storage.endpoint,
        bucket = %config.storage.bucket,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
