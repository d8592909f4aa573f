//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise the configured level applies to
/// the gateway and its middleware.
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "object_gateway={0},tower_http={0}",
                    default_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
